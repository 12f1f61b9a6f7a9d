use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;
use crate::shape::BoxSpec;

use super::{BuildCuboid, Solid};

/// Bit patterns of every field that shapes a cuboid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CuboidKey([u64; 9]);

impl CuboidKey {
    fn of(spec: &BoxSpec) -> Self {
        let r = spec.rotation.unwrap_or_default();
        let p = spec.position;
        Self(
            [spec.width, spec.height, spec.depth, p.x, p.y, p.z, r.x, r.y, r.z].map(f64::to_bits),
        )
    }
}

/// Cuboid solids keyed by the geometric value of their box spec.
///
/// Styling fields do not take part in the key, so recoloring a box reuses
/// its solid. Entries are shared read-only.
#[derive(Debug, Default)]
pub struct SolidCache {
    entries: HashMap<CuboidKey, Rc<Solid>>,
}

impl SolidCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached solid for `spec`, building it on a miss.
    ///
    /// # Errors
    ///
    /// Propagates [`BuildCuboid`] failures; nothing is cached then.
    pub fn get_or_build(&mut self, spec: &BoxSpec) -> Result<Rc<Solid>> {
        spec.validate()?;
        let key = CuboidKey::of(spec);
        if let Some(solid) = self.entries.get(&key) {
            return Ok(Rc::clone(solid));
        }
        let solid = Rc::new(BuildCuboid::new(spec).execute()?);
        self.entries.insert(key, Rc::clone(&solid));
        Ok(solid)
    }

    /// Drops every entry not produced by one of `specs`.
    pub fn retain(&mut self, specs: &[BoxSpec]) {
        let live: Vec<CuboidKey> = specs.iter().map(CuboidKey::of).collect();
        self.entries.retain(|key, _| live.contains(key));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    fn spec(width: f64) -> BoxSpec {
        BoxSpec::new(width, 1.0, 1.0, Point3::origin())
    }

    #[test]
    fn equal_geometry_shares_one_solid() {
        let mut cache = SolidCache::new();
        let a = cache.get_or_build(&spec(2.0)).unwrap();
        let b = cache.get_or_build(&spec(2.0).with_color("pink")).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn retain_invalidates_replaced_specs() {
        let mut cache = SolidCache::new();
        cache.get_or_build(&spec(1.0)).unwrap();
        cache.get_or_build(&spec(2.0)).unwrap();
        cache.retain(&[spec(2.0)]);
        assert_eq!(cache.len(), 1);
        let rebuilt = cache.get_or_build(&spec(1.0)).unwrap();
        approx::assert_relative_eq!(rebuilt.vertices()[1].x, 0.5);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn invalid_spec_is_not_cached() {
        let mut cache = SolidCache::new();
        assert!(cache.get_or_build(&spec(-1.0)).is_err());
        assert!(cache.is_empty());
    }
}
