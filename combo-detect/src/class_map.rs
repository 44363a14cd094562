use crate::{common::*, Vocabulary};

/// Per-detector translation table from local class indexes to global ids.
///
/// Built once when the ensemble is constructed. A class name missing from the
/// shared vocabulary is a configuration error and fails the build, so the
/// per-frame translation never resolves names at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMap {
    table: Vec<usize>,
}

impl ClassMap {
    pub fn new(classes: &IndexSet<String>, vocabulary: &Vocabulary) -> Result<Self> {
        let table: Vec<_> = classes
            .iter()
            .map(|name| {
                vocabulary.id(name).ok_or_else(|| {
                    format_err!("class '{}' is not in the shared vocabulary", name)
                })
            })
            .try_collect()?;
        Ok(Self { table })
    }

    pub fn translate(&self, local_class: usize) -> Result<usize> {
        self.table.get(local_class).copied().ok_or_else(|| {
            format_err!(
                "local class index {} is out of range, the detector has {} classes",
                local_class,
                self.table.len()
            )
        })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(names: &[&str]) -> IndexSet<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn class_map_translates_reordered_classes() {
        let vocabulary = Vocabulary::new(classes(&["archer", "knight", "giant"])).unwrap();
        let map = ClassMap::new(&classes(&["giant", "archer"]), &vocabulary).unwrap();
        assert_eq!(map.translate(0).unwrap(), 2);
        assert_eq!(map.translate(1).unwrap(), 0);
    }

    #[test]
    fn class_map_rejects_unknown_class() {
        let vocabulary = Vocabulary::new(classes(&["archer", "knight"])).unwrap();
        let err = ClassMap::new(&classes(&["archer", "wizard"]), &vocabulary).unwrap_err();
        assert!(err.to_string().contains("wizard"));
    }

    #[test]
    fn class_map_rejects_out_of_range_index() {
        let vocabulary = Vocabulary::new(classes(&["archer"])).unwrap();
        let map = ClassMap::new(&classes(&["archer"]), &vocabulary).unwrap();
        assert!(map.translate(1).is_err());
    }
}
