use crate::StrError;
use gemlab::mesh::{Cell, Mesh, Point};
use gemlab::shapes::GeoKind;

/// Holds sample meshes for the porous media elements
pub struct SampleMeshes {}

impl SampleMeshes {
    /// Returns one distorted Qua8 cell
    #[rustfmt::skip]
    pub fn one_qua8_distorted() -> Mesh {
        //        3-----6-----2
        //       /           /
        //      7           5      [0] (1)
        //     /           /
        //    0-----4-----1
        Mesh {
            ndim: 2,
            points: vec![
                Point { id: 0, marker: 0, coords: vec![0.0, 0.0] },
                Point { id: 1, marker: 0, coords: vec![2.0, 0.0] },
                Point { id: 2, marker: 0, coords: vec![2.5, 1.5] },
                Point { id: 3, marker: 0, coords: vec![0.3, 1.2] },
                Point { id: 4, marker: 0, coords: vec![1.0, 0.0] },
                Point { id: 5, marker: 0, coords: vec![2.25, 0.75] },
                Point { id: 6, marker: 0, coords: vec![1.4, 1.35] },
                Point { id: 7, marker: 0, coords: vec![0.15, 0.6] },
            ],
            cells: vec![
                Cell { id: 0, attribute: 1, kind: GeoKind::Qua8, points: vec![0, 1, 2, 3, 4, 5, 6, 7] },
            ],
        }
    }

    /// Returns one Tri6 cell
    #[rustfmt::skip]
    pub fn one_tri6() -> Mesh {
        //  2
        //  |`.
        //  5  `4     [0] (1)
        //  |    `.
        //  0---3--1
        Mesh {
            ndim: 2,
            points: vec![
                Point { id: 0, marker: 0, coords: vec![0.0, 0.0] },
                Point { id: 1, marker: 0, coords: vec![1.5, 0.0] },
                Point { id: 2, marker: 0, coords: vec![0.0, 1.0] },
                Point { id: 3, marker: 0, coords: vec![0.75, 0.0] },
                Point { id: 4, marker: 0, coords: vec![0.75, 0.5] },
                Point { id: 5, marker: 0, coords: vec![0.0, 0.5] },
            ],
            cells: vec![
                Cell { id: 0, attribute: 1, kind: GeoKind::Tri6, points: vec![0, 1, 2, 3, 4, 5] },
            ],
        }
    }

    /// Returns a vertical column of Qua8 cells with the base at y = 0
    ///
    /// ```text
    ///  height  o----o----o
    ///          |         |
    ///          o   [n-1] o
    ///          |         |
    ///          o----o----o
    ///          :         :
    ///          o----o----o
    ///          |         |
    ///          o   [0]   o
    ///          |         |
    ///   0.0    o----o----o
    ///         0.0      width
    /// ```
    pub fn column_qua8(ncell: usize, width: f64, height: f64) -> Result<Mesh, StrError> {
        if ncell < 1 {
            return Err("the number of cells in the column must be ≥ 1");
        }
        if width <= 0.0 || height <= 0.0 {
            return Err("width and height of the column must be > 0.0");
        }
        let dy = height / (2.0 * ncell as f64);
        let mut points = Vec::new();
        // row k: corners (and bottom/top mid-edge) at even k, mid-side nodes at odd k
        let mut rows: Vec<Vec<usize>> = Vec::new();
        for k in 0..(2 * ncell + 1) {
            let y = dy * (k as f64);
            let xs = if k % 2 == 0 {
                vec![0.0, width / 2.0, width]
            } else {
                vec![0.0, width]
            };
            let mut row = Vec::new();
            for x in xs {
                let id = points.len();
                points.push(Point {
                    id,
                    marker: 0,
                    coords: vec![x, y],
                });
                row.push(id);
            }
            rows.push(row);
        }
        let cells = (0..ncell)
            .map(|e| {
                let (bot, mid, top) = (&rows[2 * e], &rows[2 * e + 1], &rows[2 * e + 2]);
                Cell {
                    id: e,
                    attribute: 1,
                    kind: GeoKind::Qua8,
                    points: vec![bot[0], bot[2], top[2], top[0], bot[1], mid[1], top[1], mid[0]],
                }
            })
            .collect();
        Ok(Mesh { ndim: 2, points, cells })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
