use crate::StrError;
use gemlab::integ::{self, IntegPointData};
use gemlab::shapes::{GeoKind, Scratchpad};
use russell_lab::{mat_pseudo_inverse, Matrix};

/// Holds the integration points (reference coordinates and weights) of a cell
pub struct Gauss {
    /// Coordinates (r, s, t) and weight (w) of each integration point
    data: IntegPointData,

    /// Geometry ndim
    geo_ndim: usize,
}

impl Gauss {
    /// Allocates the default set of integration points of a cell kind
    pub fn new(kind: GeoKind) -> Self {
        Gauss {
            data: integ::default_points(kind),
            geo_ndim: kind.ndim(),
        }
    }

    /// Allocates the default set or the set with the given number of integration points
    pub fn new_or_sized(kind: GeoKind, n_integ_point: Option<usize>) -> Result<Self, StrError> {
        let data = match n_integ_point {
            Some(n) => integ::points(kind.class(), n)?,
            None => integ::default_points(kind),
        };
        Ok(Gauss {
            data,
            geo_ndim: kind.ndim(),
        })
    }

    /// Returns the number of integration points
    pub fn npoint(&self) -> usize {
        self.data.len()
    }

    /// Returns the reference coordinates ξ of an integration point
    pub fn coords(&self, p: usize) -> &[f64] {
        &self.data[p][0..self.geo_ndim]
    }

    /// Returns the weight of an integration point
    pub fn weight(&self, p: usize) -> f64 {
        self.data[p][3]
    }
}

/// Computes the matrix that extrapolates values from the integration points to the nodes
///
/// ```text
/// E = pinv(N)    where    N[p][m] = Nᵐ(ξₚ)
///
/// values_at_nodes = E · values_at_integ_points
/// ```
///
/// The output matrix has dims (nnode, ngauss).
pub fn calc_extrap_matrix(pad: &mut Scratchpad, gauss: &Gauss) -> Result<Matrix, StrError> {
    let nnode = pad.kind.nnode();
    let ngauss = gauss.npoint();
    let mut nn = Matrix::new(ngauss, nnode);
    for p in 0..ngauss {
        (pad.fn_interp)(&mut pad.interp, gauss.coords(p));
        for m in 0..nnode {
            nn.set(p, m, pad.interp[m]);
        }
    }
    let mut ee = Matrix::new(nnode, ngauss);
    mat_pseudo_inverse(&mut ee, &mut nn)?;
    Ok(ee)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
