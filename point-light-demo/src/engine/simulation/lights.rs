use bevy::prelude::*;
use bevy::render::extract_resource::ExtractResource;
use constants::render_settings::{INITIAL_LIGHT_POSITIONS, POINT_LIGHT_COUNT};

/// Which simulator owns the light slots this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightSource {
    #[default]
    Particles,
    Projectiles,
}

/// Positions of the shadow-casting point lights.
///
/// Written once per frame by the frame orchestrator and read, through the
/// render-world copy, by both the depth pass and the colour pass.
#[derive(Resource, ExtractResource, Debug, Clone, PartialEq)]
pub struct LightTable {
    positions: [Vec3; POINT_LIGHT_COUNT],
    active: usize,
}

impl Default for LightTable {
    fn default() -> Self {
        Self {
            positions: INITIAL_LIGHT_POSITIONS,
            active: POINT_LIGHT_COUNT,
        }
    }
}

impl LightTable {
    /// Copy the leading source positions into the table. Slots past the
    /// source length keep whatever they held before.
    pub fn publish(&mut self, source: &[Vec3]) {
        let count = source.len().min(POINT_LIGHT_COUNT);
        self.positions[..count].copy_from_slice(&source[..count]);
        self.active = count;
    }

    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.positions.get(index).copied()
    }

    pub fn positions(&self) -> &[Vec3; POINT_LIGHT_COUNT] {
        &self.positions
    }

    /// Lights fed by the active simulator in the last publish.
    pub fn active_count(&self) -> usize {
        self.active
    }

    /// Debug movement of a single light. False when `index` is out of range.
    pub fn nudge(&mut self, index: usize, delta: Vec3) -> bool {
        match self.positions.get_mut(index) {
            Some(position) => {
                *position += delta;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_from_initial_positions() {
        let table = LightTable::default();

        assert_eq!(table.positions(), &INITIAL_LIGHT_POSITIONS);
        assert_eq!(table.active_count(), POINT_LIGHT_COUNT);
    }

    #[test]
    fn publish_copies_full_source() {
        let mut table = LightTable::default();
        let source = [Vec3::X, Vec3::Y, Vec3::Z, Vec3::ONE];

        table.publish(&source);

        assert_eq!(table.positions(), &source);
        assert_eq!(table.active_count(), 4);
    }

    #[test]
    fn short_source_leaves_trailing_slots_untouched() {
        let mut table = LightTable::default();

        table.publish(&[Vec3::splat(9.0)]);

        assert_eq!(table.get(0), Some(Vec3::splat(9.0)));
        assert_eq!(table.get(1), Some(INITIAL_LIGHT_POSITIONS[1]));
        assert_eq!(table.active_count(), 1);
    }

    #[test]
    fn long_source_is_truncated() {
        let mut table = LightTable::default();
        let source = vec![Vec3::ONE; POINT_LIGHT_COUNT + 3];

        table.publish(&source);

        assert_eq!(table.active_count(), POINT_LIGHT_COUNT);
        assert!(table.positions().iter().all(|p| *p == Vec3::ONE));
    }

    #[test]
    fn out_of_range_access_is_rejected() {
        let mut table = LightTable::default();

        assert_eq!(table.get(POINT_LIGHT_COUNT), None);
        assert!(!table.nudge(POINT_LIGHT_COUNT, Vec3::X));
        assert_eq!(table.positions(), &INITIAL_LIGHT_POSITIONS);
    }

    #[test]
    fn nudge_moves_one_light() {
        let mut table = LightTable::default();

        assert!(table.nudge(2, Vec3::new(0.0, 0.1, 0.0)));

        assert_eq!(table.get(2), Some(INITIAL_LIGHT_POSITIONS[2] + Vec3::new(0.0, 0.1, 0.0)));
        assert_eq!(table.get(1), Some(INITIAL_LIGHT_POSITIONS[1]));
    }
}
