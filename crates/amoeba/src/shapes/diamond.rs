//! Diamond: Manhattan rings around the origin.

use std::iter;

use super::ShapeRule;
use crate::cell::Offset;

#[derive(Debug)]
pub struct Diamond;

impl ShapeRule for Diamond {
    fn spine(&self) -> Box<dyn Iterator<Item = Offset>> {
        let rings = (1..).flat_map(|radius: i32| {
            (-radius..=radius).map(move |row| Offset::new(row, radius - row.abs()))
        });
        Box::new(iter::once(Offset::origin()).chain(rings))
    }
}
