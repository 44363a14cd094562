use crate::common::*;

/// The shared class vocabulary, mapping class names to global class ids.
///
/// Global ids are the positions in the ordered class list, so the
/// name-to-id and id-to-name directions are two views of one structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    classes: IndexSet<String>,
}

impl Vocabulary {
    pub fn new(classes: IndexSet<String>) -> Result<Self> {
        ensure!(!classes.is_empty(), "the class list must not be empty");
        Ok(Self { classes })
    }

    /// Loads a newline-separated classes file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let lines: Vec<_> = content.lines().collect();
        let classes: IndexSet<_> = lines.iter().cloned().map(ToOwned::to_owned).collect();
        ensure!(
            lines.len() == classes.len(),
            "duplicated class names found in '{}'",
            path.display()
        );
        ensure!(
            !classes.is_empty(),
            "no classes found in '{}'",
            path.display()
        );
        Ok(Self { classes })
    }

    /// Global id of a class name.
    pub fn id(&self, name: &str) -> Option<usize> {
        self.classes.get_index_of(name)
    }

    /// Class name of a global id.
    pub fn name(&self, id: usize) -> Option<&str> {
        self.classes.get_index(id).map(String::as_str)
    }

    pub fn classes(&self) -> &IndexSet<String> {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
