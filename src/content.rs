//! Static content table: part identifier → title, reference link,
//! descriptive text, thumbnail path. Consumed read-only by the info panel.
//!
//! The table is external configuration: a JSON file can replace the
//! built-in entries. Identifiers deliberately match scene node names, so a
//! model rename silently orphans its entry - flagged, not fixed.

use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PartInfo {
    pub title: String,
    pub link: String,
    pub text: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct PartCatalog {
    entries: HashMap<String, PartInfo>,
}

impl PartCatalog {
    pub fn get(&self, id: &str) -> Option<&PartInfo> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| CatalogError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// External table when present, builtin otherwise. A missing or
    /// malformed file is logged and degrades to the builtin entries.
    pub fn load_or_builtin(path: &Path) -> Self {
        match Self::load_from_file(path) {
            Ok(catalog) => {
                log::info!(
                    "part catalog loaded from {} ({} entries)",
                    path.display(),
                    catalog.len()
                );
                catalog
            }
            Err(error) => {
                log::warn!("{error}; using the builtin part catalog");
                Self::builtin()
            }
        }
    }

    /// Built-in table covering every part of the bundled cell model.
    pub fn builtin() -> Self {
        let raw: [(&str, &str, &str, &str, &str); 12] = [
            (
                "nucleolus",
                "Nucleolus",
                "https://en.wikipedia.org/wiki/Nucleolus",
                "The nucleolus is a round body located inside the nucleus of a eukaryotic cell. It is not surrounded by a membrane but sits in the nucleus. The nucleolus makes ribosomal subunits from proteins and ribosomal RNA, also known as rRNA.",
                "images/cellParts/nucleolus.jpeg",
            ),
            (
                "nucleus",
                "Nucleus",
                "https://en.wikipedia.org/wiki/Cell_nucleus",
                "The nucleus is a highly specialized organelle that serves as the information and administrative center of the cell. It stores the cell's hereditary material, or DNA, and it coordinates the cell's activities, which include intermediary metabolism, growth, protein synthesis, and reproduction.",
                "images/cellParts/Nucleus.jpg",
            ),
            (
                "cover",
                "Cell Membrane",
                "https://en.wikipedia.org/wiki/Cell_membrane",
                "The cell membrane has two functions: first, to be a barrier keeping the constituents of the cell in and unwanted substances out and, second, to be a gate allowing transport into the cell of essential nutrients and movement from the cell of waste products.",
                "images/cellParts/cellMembrane.PNG",
            ),
            (
                "lysosome",
                "Lysosome",
                "https://en.wikipedia.org/wiki/Lysosome",
                "Lysosomes are organelles that contain digestive enzymes. They digest excess or worn out organelles, food particles, and engulfed viruses or bacteria. Lysosomes are like the stomach of the cell.",
                "images/cellParts/lysosome.PNG",
            ),
            (
                "mitochondria",
                "Mitochondria",
                "https://en.wikipedia.org/wiki/Mitochondrion",
                "Mitochondria are known as the powerhouses of the cell. They are organelles that act like a digestive system which takes in nutrients, breaks them down, and creates energy rich molecules for the cell.",
                "images/cellParts/mitochondrion.jpg",
            ),
            (
                "endoplasmicReticulum",
                "Endoplasmic Reticulum",
                "https://en.wikipedia.org/wiki/Endoplasmic_reticulum",
                "It is mainly responsible for the transportation of proteins and other carbohydrates to another organelle, which includes lysosomes, Golgi apparatus, plasma membrane, and more. It provides an increased surface area for cellular reactions.",
                "images/cellParts/endoplasmicReticulum.PNG",
            ),
            (
                "golgiApparatus",
                "Golgi Apparatus",
                "https://en.wikipedia.org/wiki/Golgi_apparatus",
                "It has been likened to the cell's post office. A major function is the modifying, sorting and packaging of proteins for secretion. It is also involved in the transport of lipids around the cell, and the creation of lysosomes.",
                "images/cellParts/golgiApparatus.jpeg",
            ),
            (
                "microtubes",
                "Microtubules",
                "https://en.wikipedia.org/wiki/Microtubule",
                "Microtubules are conveyer belts inside the cells. They move vesicles, granules, organelles like mitochondria, and chromosomes via special attachment proteins.",
                "images/cellParts/microtubes.png",
            ),
            (
                "03_low_1",
                "Centrosomes",
                "https://en.wikipedia.org/wiki/Centrosome",
                "The main purpose of a centrosome is to organize microtubules and provide structure for the cell, as well as work to pull chromatids apart during cell division.",
                "images/cellParts/centrosome.PNG",
            ),
            (
                "pores",
                "Nuclear Pores",
                "https://en.wikipedia.org/wiki/Nuclear_pore",
                "Nuclear pores are protein-based channels in the nuclear envelope. They regulate the movement of molecules from the nucleus to the cytoplasm, and vice versa.",
                "images/cellParts/pores.PNG",
            ),
            (
                "vesicles",
                "Vesicles",
                "https://en.wikipedia.org/wiki/Vesicle_(biology_and_chemistry)",
                "Vesicles are cellular organelles that are composed of a lipid bilayer. They are used to transport materials from one place to another, and also function in metabolism and enzyme storage.",
                "images/cellParts/vesicles.PNG",
            ),
            (
                "filler",
                "Nuclear Envelope",
                "https://en.wikipedia.org/wiki/Nuclear_envelope",
                "The nuclear envelope, also known as the nuclear membrane, is made up of two lipid bilayer membranes which in eukaryotic cells surrounds the nucleus, which encases the genetic material.",
                "images/cellParts/envelope.PNG",
            ),
        ];

        let entries = raw
            .into_iter()
            .map(|(id, title, link, text, image)| {
                (
                    id.to_string(),
                    PartInfo {
                        title: title.to_string(),
                        link: link.to_string(),
                        text: text.to_string(),
                        image: image.to_string(),
                    },
                )
            })
            .collect();
        Self { entries }
    }
}
