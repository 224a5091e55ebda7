use super::Idealization;
use crate::StrError;
use std::fmt;

/// Holds configuration data for the porous media elements
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Geometry idealization
    pub ideal: Idealization,

    /// Gravity acceleration
    pub gravity: f64,

    /// Use the basic (corner nodes) interpolation for the liquid pressure (LBB condition)
    pub lbb: bool,

    /// Extrapolate integration point values of the liquid mass to the pressure nodes
    pub extrapolation: bool,

    /// Number of integration points overriding the default of the displacement cell
    pub n_integ_point: Option<usize>,

    /// Prints information while running
    pub verbose: bool,
}

impl Config {
    /// Allocates a new instance
    pub fn new(ndim: usize) -> Self {
        Config {
            ideal: Idealization::new(ndim),
            gravity: 0.0,
            lbb: true,
            extrapolation: false,
            n_integ_point: None,
            verbose: false,
        }
    }

    /// Sets the gravity acceleration
    pub fn set_gravity(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value < 0.0 {
            return Err("gravity must be ≥ 0.0");
        }
        self.gravity = value;
        Ok(self)
    }

    /// Sets the thickness for plane-stress
    pub fn set_thickness(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value <= 0.0 {
            return Err("thickness must be > 0.0");
        }
        self.ideal.thickness = value;
        Ok(self)
    }

    /// Sets a 2D plane-stress problem, otherwise plane-strain in 2D
    ///
    /// **Note:** If false (plane-strain), this function will set the thickness to 1.0.
    pub fn set_plane_stress(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        if flag && !self.ideal.two_dim {
            return Err("cannot set plane_stress in 3D");
        }
        self.ideal.plane_stress = flag;
        if !flag {
            self.ideal.thickness = 1.0;
        }
        Ok(self)
    }

    /// Sets the LBB flag (basic interpolation for the liquid pressure)
    pub fn set_lbb(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.lbb = flag;
        Ok(self)
    }

    /// Sets the extrapolation of the liquid mass to the pressure nodes
    pub fn set_extrapolation(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.extrapolation = flag;
        Ok(self)
    }

    /// Sets the number of integration points
    pub fn set_n_integ_point(&mut self, value: usize) -> Result<&mut Self, StrError> {
        if value < 1 {
            return Err("number of integration points must be ≥ 1");
        }
        self.n_integ_point = Some(value);
        Ok(self)
    }

    /// Sets the verbose mode
    pub fn set_verbose(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.verbose = flag;
        Ok(self)
    }

    /// Returns the gravity vector (pointing downwards along the last axis)
    pub fn gravity_vector(&self) -> Vec<f64> {
        let ndim = self.ideal.ndim();
        let mut g = vec![0.0; ndim];
        g[ndim - 1] = -self.gravity;
        g
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n")?;
        write!(f, "==================\n")?;
        write!(f, "ndim = {:?}\n", self.ideal.ndim())?;
        write!(f, "plane_stress = {:?}\n", self.ideal.plane_stress)?;
        write!(f, "thickness = {:?}\n", self.ideal.thickness)?;
        write!(f, "gravity = {:?}\n", self.gravity)?;
        write!(f, "lbb = {:?}\n", self.lbb)?;
        write!(f, "extrapolation = {:?}\n", self.extrapolation)?;
        write!(f, "n_integ_point = {:?}\n", self.n_integ_point)?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::StrError;

    #[test]
    fn setters_capture_errors() {
        let mut config = Config::new(2);
        assert_eq!(config.set_gravity(-10.0).err(), Some("gravity must be ≥ 0.0"));
        assert_eq!(config.set_thickness(0.0).err(), Some("thickness must be > 0.0"));
        assert_eq!(
            config.set_n_integ_point(0).err(),
            Some("number of integration points must be ≥ 1")
        );
        let mut config = Config::new(3);
        assert_eq!(config.set_plane_stress(true).err(), Some("cannot set plane_stress in 3D"));
    }

    #[test]
    fn setters_and_display_work() -> Result<(), StrError> {
        let mut config = Config::new(2);
        config
            .set_gravity(10.0)? // m/s²
            .set_plane_stress(true)?
            .set_thickness(0.5)?
            .set_lbb(false)?
            .set_extrapolation(true)?
            .set_n_integ_point(4)?
            .set_verbose(false)?;
        assert_eq!(config.ideal.thickness, 0.5);
        assert_eq!(config.gravity_vector(), &[0.0, -10.0]);
        assert_eq!(
            format!("{}", config),
            "Configuration data\n\
             ==================\n\
             ndim = 2\n\
             plane_stress = true\n\
             thickness = 0.5\n\
             gravity = 10.0\n\
             lbb = false\n\
             extrapolation = true\n\
             n_integ_point = Some(4)\n"
        );
        config.set_plane_stress(false)?;
        assert_eq!(config.ideal.thickness, 1.0);
        Ok(())
    }
}
