use super::Idealization;
use crate::StrError;
use gemlab::shapes::Scratchpad;
use russell_lab::Vector;
use russell_tensor::Tensor2;

/// Calculates strain (ε) or strain increment (Δε) from the global (U) or (ΔU) vectors
///
/// # Input
///
/// * `eps` -- The (delta) strain tensor
/// * `uu` -- The global (delta) displacement vector
/// * `ideal` -- The geometry idealization (plane-strain, plane-stress, none)
/// * `l2g` -- The local to global map of the displacement equations (ndim·nnode)
/// * `ksi` -- The coordinate of the integration point (ξᵖ)
/// * `pad` -- Scratchpad to calculate interpolation functions
#[rustfmt::skip]
pub(crate) fn calculate_strain(
    eps: &mut Tensor2,
    uu: &Vector,
    ideal: &Idealization,
    l2g: &[usize],
    ksi: &[f64],
    pad: &mut Scratchpad,
) -> Result<(), StrError> {
    let nnode = pad.kind.nnode();
    pad.calc_gradient(ksi)?;
    let gg = &pad.gradient;
    eps.clear();
    if ideal.two_dim {
        for m in 0..nnode {
            eps.sym_add(0, 0, 1.0,  uu[l2g[0+2*m]] * gg.get(m,0));
            eps.sym_add(1, 1, 1.0,  uu[l2g[1+2*m]] * gg.get(m,1));
            eps.sym_add(0, 1, 1.0, (uu[l2g[0+2*m]] * gg.get(m,1) + uu[l2g[1+2*m]] * gg.get(m,0))/2.0);
        }
    } else {
        for m in 0..nnode {
            eps.sym_add(0, 0, 1.0,  uu[l2g[0+3*m]] * gg.get(m,0));
            eps.sym_add(1, 1, 1.0,  uu[l2g[1+3*m]] * gg.get(m,1));
            eps.sym_add(2, 2, 1.0,  uu[l2g[2+3*m]] * gg.get(m,2));
            eps.sym_add(0, 1, 1.0, (uu[l2g[0+3*m]] * gg.get(m,1) + uu[l2g[1+3*m]] * gg.get(m,0))/2.0);
            eps.sym_add(1, 2, 1.0, (uu[l2g[1+3*m]] * gg.get(m,2) + uu[l2g[2+3*m]] * gg.get(m,1))/2.0);
            eps.sym_add(0, 2, 1.0, (uu[l2g[0+3*m]] * gg.get(m,2) + uu[l2g[2+3*m]] * gg.get(m,0))/2.0);
        }
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
