//! Event vignette loader.

use std::path::Path;

use crate::EventBook;
use crate::loaders::{LoadResult, read_file};

pub struct EventLoader;

impl EventLoader {
    pub fn load(path: &Path) -> LoadResult<EventBook> {
        let content = read_file(path)?;
        let book: EventBook = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse events RON: {}", e))?;
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::EventEffect;
    use tempfile::TempDir;

    #[test]
    fn loads_vignettes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.ron");
        std::fs::write(
            &path,
            r#"(vignettes: [
                (tile: "Ford", card: (
                    title: "At the Ford",
                    content: "Zilu asks the way.",
                    effect_label: "gain one meat",
                    effect: GainMeat,
                )),
            ])"#,
        )
        .unwrap();

        let book = EventLoader::load(&path).unwrap();
        assert_eq!(book.lookup("Ford").map(|c| c.effect), Some(EventEffect::GainMeat));
    }
}
