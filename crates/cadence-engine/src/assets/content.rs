/// Handle to the game's asset manager.
///
/// The engine only owns and hands out this handle; how assets under
/// `root_directory` are fetched and decoded is up to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentManager {
    root_directory: String,
}

impl ContentManager {
    pub fn new(root_directory: impl Into<String>) -> Self {
        Self {
            root_directory: root_directory.into(),
        }
    }

    pub fn root_directory(&self) -> &str {
        &self.root_directory
    }

    pub fn set_root_directory(&mut self, root_directory: impl Into<String>) {
        self.root_directory = root_directory.into();
    }

    /// Path of a named asset relative to the content root.
    pub fn resolve(&self, asset_name: &str) -> String {
        let root = self.root_directory.trim_end_matches('/');
        let name = asset_name.trim_start_matches('/');
        if root.is_empty() {
            name.to_string()
        } else {
            format!("{root}/{name}")
        }
    }
}

impl Default for ContentManager {
    fn default() -> Self {
        Self::new("Content")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_under_root() {
        let content = ContentManager::default();
        assert_eq!(content.resolve("sprites/hero.png"), "Content/sprites/hero.png");
    }

    #[test]
    fn resolve_normalizes_slashes() {
        let content = ContentManager::new("assets/");
        assert_eq!(content.resolve("/font.json"), "assets/font.json");
        assert_eq!(ContentManager::new("").resolve("a.png"), "a.png");
    }
}
