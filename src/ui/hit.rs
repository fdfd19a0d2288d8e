//! Clickable regions recorded while rendering, for mouse hit-testing.

use ratatui::layout::Rect;

use crate::core::event::point_in_rect;

/// Rect → target map.  Later regions sit on top of earlier ones.
#[derive(Debug, Clone)]
pub struct HitMap<T> {
    regions: Vec<(Rect, T)>,
}

impl<T> Default for HitMap<T> {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
        }
    }
}

impl<T> HitMap<T> {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Record a region; empty rects are ignored.
    pub fn push(&mut self, area: Rect, target: T) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, target));
        }
    }

    /// Topmost target under `(x, y)`.
    pub fn hit(&self, x: u16, y: u16) -> Option<&T> {
        self.regions
            .iter()
            .rev()
            .find(|(r, _)| point_in_rect(*r, x, y))
            .map(|(_, t)| t)
    }

    /// Area recorded for the first region whose target matches.
    pub fn area_of(&self, pred: impl Fn(&T) -> bool) -> Option<Rect> {
        self.regions.iter().find(|(_, t)| pred(t)).map(|(r, _)| *r)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topmost_region_wins() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 10, 10), "base");
        hits.push(Rect::new(2, 2, 2, 2), "overlay");
        hits.push(Rect::new(5, 5, 0, 3), "empty");
        assert_eq!(hits.hit(3, 3), Some(&"overlay"));
        assert_eq!(hits.hit(8, 8), Some(&"base"));
        assert_eq!(hits.hit(5, 5), Some(&"base"));
        assert_eq!(hits.hit(11, 0), None);
        assert_eq!(hits.area_of(|t| *t == "overlay"), Some(Rect::new(2, 2, 2, 2)));
    }
}
