//! Bunch-crossing indexed collection of trigger objects.
//!
//! Crossings cover the inclusive range `first_bx..=last_bx`. Each crossing
//! keeps its objects in insertion order, which decides link assignment when
//! packing.

use serde::{Deserialize, Serialize};

use crate::{Tau, TauPackError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BxVector<T> {
    first_bx: i32,
    last_bx: i32,
    crossings: Vec<Vec<T>>,
}

pub type TauBxCollection = BxVector<Tau>;

impl<T> BxVector<T> {
    /// Empty collection over `first_bx..=last_bx`. An inverted range holds no crossings.
    pub fn new(first_bx: i32, last_bx: i32) -> Self {
        let n = if last_bx < first_bx {
            0
        } else {
            (last_bx as i64 - first_bx as i64 + 1) as usize
        };
        let mut crossings = Vec::with_capacity(n);
        crossings.resize_with(n, Vec::new);
        Self {
            first_bx,
            last_bx,
            crossings,
        }
    }

    pub fn first_bx(&self) -> i32 {
        self.first_bx
    }

    pub fn last_bx(&self) -> i32 {
        self.last_bx
    }

    /// Number of crossings in the range.
    pub fn n_bx(&self) -> usize {
        self.crossings.len()
    }

    fn index(&self, bx: i32) -> Option<usize> {
        if bx < self.first_bx || bx > self.last_bx {
            return None;
        }
        Some((bx as i64 - self.first_bx as i64) as usize)
    }

    /// Append an object to crossing `bx`.
    pub fn push(&mut self, bx: i32, item: T) -> Result<(), TauPackError> {
        let idx = self.index(bx).ok_or_else(|| {
            TauPackError::Collection(format!(
                "bx {} outside range [{}, {}]",
                bx, self.first_bx, self.last_bx
            ))
        })?;
        self.crossings[idx].push(item);
        Ok(())
    }

    /// Objects of crossing `bx` in insertion order; empty outside the range.
    pub fn bx(&self, bx: i32) -> &[T] {
        match self.index(bx) {
            Some(idx) => &self.crossings[idx],
            None => &[],
        }
    }

    pub fn size(&self, bx: i32) -> usize {
        self.bx(bx).len()
    }

    /// Total objects over all crossings.
    pub fn len(&self) -> usize {
        self.crossings.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate `(bx, objects)` in increasing bx order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &[T])> + '_ {
        self.crossings
            .iter()
            .enumerate()
            .map(move |(i, c)| (self.first_bx + i as i32, c.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_order_per_crossing() {
        let mut v = BxVector::new(-2, 2);
        v.push(0, 'a').unwrap();
        v.push(-2, 'b').unwrap();
        v.push(0, 'c').unwrap();
        assert_eq!(v.n_bx(), 5);
        assert_eq!(v.bx(0), &['a', 'c']);
        assert_eq!(v.bx(-2), &['b']);
        assert_eq!(v.size(1), 0);
        assert_eq!(v.len(), 3);
        let order: Vec<i32> = v.iter().map(|(bx, _)| bx).collect();
        assert_eq!(order, vec![-2, -1, 0, 1, 2]);
    }

    #[test]
    fn out_of_range_push_fails() {
        let mut v = BxVector::new(0, 0);
        assert!(matches!(v.push(1, 0u8), Err(TauPackError::Collection(_))));
        assert!(v.bx(7).is_empty());
    }

    #[test]
    fn inverted_range_is_empty() {
        let v: BxVector<u8> = BxVector::new(3, 1);
        assert_eq!(v.n_bx(), 0);
        assert!(v.is_empty());
    }
}
