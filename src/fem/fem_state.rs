use crate::base::DynCoefficients;
use crate::StrError;
use russell_lab::Vector;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds the state of a simulation as seen by the elements
///
/// The star variables are computed by the time integrator at the beginning of each time step:
///
/// * `uu_star` holds ζ* at the displacement equations and ψ* at the liquid pressure equations
/// * `vv_star` holds χ* at the displacement equations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FemState {
    /// Time
    pub t: f64,

    /// Delta time
    pub dt: f64,

    /// Time-discretization coefficients
    pub coefs: DynCoefficients,

    /// Primary unknowns {Y}
    ///
    /// (n_equation)
    pub uu: Vector,

    /// Increment of primary unknowns {ΔY} since the last update of secondary values
    ///
    /// (n_equation)
    pub duu: Vector,

    /// First time derivative of primary unknowns
    ///
    /// (n_equation)
    pub vv: Vector,

    /// Second time derivative of primary unknowns
    ///
    /// (n_equation)
    pub aa: Vector,

    /// Auxiliary time-discretization variable (ζ* and ψ*)
    ///
    /// (n_equation)
    pub uu_star: Vector,

    /// Auxiliary time-discretization variable (χ*)
    ///
    /// (n_equation)
    pub vv_star: Vector,
}

impl FemState {
    /// Allocates a new instance with steady coefficients
    pub fn new(n_equation: usize) -> Result<Self, StrError> {
        if n_equation < 1 {
            return Err("the number of equations must be ≥ 1");
        }
        Ok(FemState {
            t: 0.0,
            dt: 1.0,
            coefs: DynCoefficients::new_steady(),
            uu: Vector::new(n_equation),
            duu: Vector::new(n_equation),
            vv: Vector::new(n_equation),
            aa: Vector::new(n_equation),
            uu_star: Vector::new(n_equation),
            vv_star: Vector::new(n_equation),
        })
    }

    /// Reads a JSON file containing the state data
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(input);
        let state = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(state)
    }

    /// Writes a JSON file with the state data
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
