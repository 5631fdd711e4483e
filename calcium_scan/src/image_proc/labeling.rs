//! Connected-component labeling of binary masks
//!
//! Two raster passes over the mask with a union-find table in between:
//!
//! 1. Each foreground pixel takes a provisional label from the neighbours
//!    already scanned (left and the row above). When several neighbours carry
//!    different labels those labels are merged in the union-find table. A
//!    pixel with no labeled neighbour opens a new provisional label.
//! 2. Every provisional label is resolved to its root, and roots are renumbered
//!    densely from 1 in the order the scan first meets them.
//!
//! Background stays 0. The image border is a hard edge, nothing wraps.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::image_size::ImageSize;

/// Pixel adjacency rule used to decide which foreground pixels touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    /// Orthogonal neighbours only
    Four,
    /// Orthogonal and diagonal neighbours
    #[default]
    Eight,
}

impl Connectivity {
    /// All (dy, dx) offsets considered adjacent under this rule
    pub fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &[(-1, 0), (0, -1), (0, 1), (1, 0)],
            Connectivity::Eight => &[
                (-1, -1),
                (-1, 0),
                (-1, 1),
                (0, -1),
                (0, 1),
                (1, -1),
                (1, 0),
                (1, 1),
            ],
        }
    }

    /// Offsets of neighbours that precede a pixel in raster order
    fn scanned_offsets(self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &[(-1, 0), (0, -1)],
            Connectivity::Eight => &[(-1, -1), (-1, 0), (-1, 1), (0, -1)],
        }
    }
}

/// Disjoint-set forest over provisional labels
///
/// Slot 0 is reserved for background so labels index the table directly.
#[derive(Debug)]
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        Self { parent: vec![0] }
    }

    /// Open a new singleton set and return its label
    fn make_set(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    /// Root of `label`, halving the path on the way up
    fn find(&mut self, mut label: u32) -> u32 {
        while self.parent[label as usize] != label {
            let grandparent = self.parent[self.parent[label as usize] as usize];
            self.parent[label as usize] = grandparent;
            label = grandparent;
        }
        label
    }

    /// Merge the sets of `a` and `b`, returning the surviving root
    ///
    /// The smaller root survives, so a root is always the earliest
    /// provisional label of its set.
    fn union(&mut self, a: u32, b: u32) -> u32 {
        let root_a = self.find(a);
        let root_b = self.find(b);
        let (small, big) = if root_a <= root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[big as usize] = small;
        small
    }

    /// Number of provisional labels handed out
    fn len(&self) -> usize {
        self.parent.len() - 1
    }
}

/// Labeled regions of a mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: Array2<u32>,
    count: u32,
}

impl LabelMap {
    /// Per-pixel labels, 0 for background and `1..=count` for regions
    pub fn labels(&self) -> ArrayView2<'_, u32> {
        self.labels.view()
    }

    /// Number of distinct regions
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn label_at(&self, row: usize, col: usize) -> u32 {
        self.labels[[row, col]]
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::of_view(&self.labels.view())
    }

    pub fn into_parts(self) -> (Array2<u32>, u32) {
        (self.labels, self.count)
    }
}

/// Find connected components in a binary mask
///
/// # Arguments
///
/// * `mask` - Binary mask, true for foreground
/// * `connectivity` - Adjacency rule, `Connectivity::Eight` for deposit
///   measurement
///
/// # Returns
///
/// Label map whose labels are dense and numbered by first appearance in a
/// row-major scan
pub fn label_components(mask: ArrayView2<bool>, connectivity: Connectivity) -> LabelMap {
    let (rows, cols) = mask.dim();
    let mut labels = Array2::<u32>::zeros((rows, cols));
    let mut sets = UnionFind::new();
    let offsets = connectivity.scanned_offsets();

    for row in 0..rows {
        for col in 0..cols {
            if !mask[[row, col]] {
                continue;
            }

            let mut current = 0u32;
            for &(dy, dx) in offsets {
                let (Some(ny), Some(nx)) = (row.checked_add_signed(dy), col.checked_add_signed(dx))
                else {
                    continue;
                };
                if nx >= cols {
                    continue;
                }

                let neighbor = labels[[ny, nx]];
                if neighbor == 0 {
                    continue;
                }
                current = if current == 0 {
                    neighbor
                } else {
                    sets.union(current, neighbor)
                };
            }

            if current == 0 {
                current = sets.make_set();
            }
            labels[[row, col]] = current;
        }
    }

    let mut dense = vec![0u32; sets.len() + 1];
    let mut count = 0u32;
    for label in labels.iter_mut() {
        if *label == 0 {
            continue;
        }
        let root = sets.find(*label) as usize;
        if dense[root] == 0 {
            count += 1;
            dense[root] = count;
        }
        *label = dense[root];
    }

    LabelMap { labels, count }
}
