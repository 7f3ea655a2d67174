use crate::body::Body;
use crate::vector::Vector2D;
use std::collections::VecDeque;

/// The last `max` positions a body passed through, oldest first.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    points: VecDeque<Vector2D>,
    max: usize,
}

impl Trail {
    pub fn new(max: usize) -> Trail {
        Trail {
            points: VecDeque::with_capacity(max + 1),
            max,
        }
    }

    pub fn push(&mut self, body: &Body) {
        self.points.push_back(body.position());
        while self.points.len() > self.max {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = &Vector2D> {
        self.points.iter()
    }

    /// Line segments newest first, each paired with how far back it is
    /// as a fraction in [0, 1) so renderers can fade the tail.
    pub fn segments(&self) -> impl Iterator<Item = (Vector2D, Vector2D, f32)> + '_ {
        let n = self.points.len().max(1) as f32;
        self.points
            .iter()
            .rev()
            .zip(self.points.iter().rev().skip(1))
            .enumerate()
            .map(move |(i, (a, b))| (*a, *b, i as f32 / n))
    }
}
