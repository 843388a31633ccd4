use std::sync::Arc;

use crate::{PROFILE_DOCUMENT_EXT, PROFILE_DOCUMENT_NAME, PuzzleState, ResourceProvider};

mod catalog;

const SAMPLE_DOCUMENT: &str = r#"{
    "response": {
        "locations": [
            {
                "name": "New York",
                "details": "Main office",
                "services": [
                    {
                        "platform": "iOS",
                        "programmers": [
                            { "name": "Ada", "title": "Lead" },
                            { "name": "Grace" }
                        ]
                    },
                    {
                        "platform": "Android",
                        "programmers": [
                            { "name": "Linus" }
                        ]
                    }
                ]
            },
            {
                "name": "Boston",
                "services": [
                    {
                        "platform": "Web",
                        "programmers": [
                            { "name": "Tim" },
                            { "name": "Brendan" }
                        ]
                    }
                ]
            }
        ]
    }
}"#;

/// In-memory resources where images are just their names.
#[derive(Debug, Default)]
struct TestResources {
    missing_images: Vec<&'static str>,
    document: Option<Vec<u8>>,
}
impl TestResources {
    fn with_document(document: &str) -> Self {
        Self {
            missing_images: vec![],
            document: Some(document.as_bytes().to_vec()),
        }
    }
    fn sample() -> Self {
        Self::with_document(SAMPLE_DOCUMENT)
    }
}
impl ResourceProvider for TestResources {
    type Image = String;

    fn load_image(&self, name: &str) -> Option<Self::Image> {
        if self.missing_images.iter().any(|&missing| missing == name) {
            None
        } else {
            Some(format!("image {name}"))
        }
    }

    fn read_bundled_file(&self, name: &str, ext: &str) -> Option<Vec<u8>> {
        assert_eq!(name, PROFILE_DOCUMENT_NAME);
        assert_eq!(ext, PROFILE_DOCUMENT_EXT);
        self.document.clone()
    }
}

fn new_puzzle(resources: TestResources) -> PuzzleState<TestResources> {
    PuzzleState::new(Arc::new(resources)).with_seed(1234)
}

fn tile_names(puzzle: &PuzzleState<TestResources>) -> Vec<&str> {
    puzzle.tiles().map(|tile| tile.name.as_str()).collect()
}
