use std::sync::OnceLock;

use super::Detector;
use crate::types::Encoding;

// Declaration order is the priority order used by the decoder.
macro_rules! register_detectors {
    ($($detector:ident),* $(,)?) => {
        fn build_registry() -> Registry {
            let detectors: Vec<Box<dyn Detector>> = vec![
                $(Box::new(super::$detector)),*
            ];

            for (idx, detector) in detectors.iter().enumerate() {
                if detectors[..idx].iter().any(|d| d.encoding() == detector.encoding()) {
                    panic!("Duplicate detector for encoding '{}'", detector.encoding());
                }
            }

            Registry { detectors }
        }
    };
}

register_detectors! {
    Hex,
    Base64,
    Proto,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub struct Registry {
    detectors: Vec<Box<dyn Detector>>,
}

impl Registry {
    fn new() -> Self {
        build_registry()
    }

    pub fn global() -> &'static Registry {
        REGISTRY.get_or_init(Registry::new)
    }

    /// Detectors from highest to lowest priority.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Detector> {
        self.detectors.iter().map(|d| d.as_ref())
    }

    pub fn priority(&self) -> Vec<Encoding> {
        self.iter().map(|d| d.encoding()).collect()
    }
}
