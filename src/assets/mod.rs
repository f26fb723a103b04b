//! Two-stage asset loading: material definitions first, then geometry
//! bound against them. The loader is a cooperative state machine - each
//! `pump()` performs at most one chunk of file I/O and yields the next
//! tagged outcome, so the event loop and input handling keep running while
//! a load is outstanding. There is no cancellation and no retry; a load
//! runs to `Finished` or `Failed`.

pub mod mtl;
pub mod obj;

use std::collections::VecDeque;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use glam::Vec3;

use mtl::MaterialLib;
use obj::GroupDef;

use crate::scene::{NodeId, SceneGraph, SceneNode};

pub const MATERIAL_FILE: &str = "CellAnatomy.mtl";
pub const GEOMETRY_FILE: &str = "CellAnatomy.obj";

/// Fixed identifier of the attached subtree's root. Deliberately absent
/// from the index exclusion list: the root itself is pickable.
pub const ASSET_ROOT_NAME: &str = "cellObject";

const INITIAL_SCALE: f32 = 0.1;
const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    Materials,
    Geometry,
}

impl std::fmt::Display for LoadStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadStage::Materials => write!(f, "material"),
            LoadStage::Geometry => write!(f, "geometry"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{stage} stage failed reading {path}: {source}")]
    Io {
        stage: LoadStage,
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage} stage failed parsing {path} at line {line}: {reason}")]
    Parse {
        stage: LoadStage,
        path: String,
        line: usize,
        reason: String,
    },
}

impl LoadError {
    pub fn stage(&self) -> LoadStage {
        match self {
            LoadError::Io { stage, .. } | LoadError::Parse { stage, .. } => *stage,
        }
    }
}

/// Everything the geometry stage produced, ready to materialize as a
/// scene subtree. Nothing touches the scene graph until `attach_asset`.
#[derive(Debug)]
pub struct ParsedAsset {
    pub materials: MaterialLib,
    pub groups: Vec<GroupDef>,
}

#[derive(Debug)]
pub enum LoadEvent {
    /// Byte-level progress, non-decreasing per stage, 1.0 on the final chunk.
    Progress { stage: LoadStage, ratio: f32 },
    /// Emitted exactly once per stage, after the 1.0 progress event and only
    /// once the stage's content has parsed. A stage that downloads fully but
    /// fails to parse never completes; it fails.
    StageComplete(LoadStage),
    Finished(ParsedAsset),
    Failed(LoadError),
}

struct StageReader {
    file: File,
    path: PathBuf,
    total: u64,
    read: u64,
    buffer: Vec<u8>,
}

impl StageReader {
    fn open(path: PathBuf, stage: LoadStage) -> Result<Self, LoadError> {
        let open_result = File::open(&path).and_then(|file| {
            let total = file.metadata()?.len();
            Ok((file, total))
        });
        match open_result {
            Ok((file, total)) => Ok(Self {
                file,
                path,
                total,
                read: 0,
                buffer: Vec::with_capacity(total as usize),
            }),
            Err(source) => Err(LoadError::Io {
                stage,
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Read one chunk; true once the whole file is buffered.
    fn pump_chunk(&mut self, stage: LoadStage) -> Result<bool, LoadError> {
        let mut chunk = [0u8; CHUNK_SIZE];
        let count = self.file.read(&mut chunk).map_err(|source| LoadError::Io {
            stage,
            path: self.path.display().to_string(),
            source,
        })?;
        self.buffer.extend_from_slice(&chunk[..count]);
        self.read += count as u64;
        Ok(count == 0 || self.read >= self.total)
    }

    fn ratio(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            (self.read as f64 / self.total as f64) as f32
        }
    }

    fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }
}

enum Phase {
    Start,
    Materials(StageReader),
    Geometry {
        materials: MaterialLib,
        reader: StageReader,
    },
    Done,
}

/// In-flight load of one model. Drain with `pump()` (or as an iterator);
/// `None` means the sequence is exhausted.
pub struct AssetLoad {
    base: PathBuf,
    phase: Phase,
    queue: VecDeque<LoadEvent>,
    geometry_started: bool,
}

impl AssetLoad {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            phase: Phase::Start,
            queue: VecDeque::new(),
            geometry_started: false,
        }
    }

    /// True once the geometry stage has been entered. The geometry file is
    /// not even opened before the material stage succeeds.
    pub fn geometry_started(&self) -> bool {
        self.geometry_started
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done) && self.queue.is_empty()
    }

    pub fn pump(&mut self) -> Option<LoadEvent> {
        while self.queue.is_empty() {
            match std::mem::replace(&mut self.phase, Phase::Done) {
                Phase::Start => {
                    let path = self.base.join(MATERIAL_FILE);
                    match StageReader::open(path, LoadStage::Materials) {
                        Ok(reader) => self.phase = Phase::Materials(reader),
                        Err(error) => self.fail(error),
                    }
                }
                Phase::Materials(mut reader) => {
                    match reader.pump_chunk(LoadStage::Materials) {
                        Ok(false) => {
                            self.queue.push_back(LoadEvent::Progress {
                                stage: LoadStage::Materials,
                                ratio: reader.ratio(),
                            });
                            self.phase = Phase::Materials(reader);
                        }
                        Ok(true) => {
                            self.queue.push_back(LoadEvent::Progress {
                                stage: LoadStage::Materials,
                                ratio: 1.0,
                            });
                            self.finish_materials(&reader);
                        }
                        Err(error) => self.fail(error),
                    }
                }
                Phase::Geometry {
                    materials,
                    mut reader,
                } => match reader.pump_chunk(LoadStage::Geometry) {
                    Ok(false) => {
                        self.queue.push_back(LoadEvent::Progress {
                            stage: LoadStage::Geometry,
                            ratio: reader.ratio(),
                        });
                        self.phase = Phase::Geometry { materials, reader };
                    }
                    Ok(true) => {
                        self.queue.push_back(LoadEvent::Progress {
                            stage: LoadStage::Geometry,
                            ratio: 1.0,
                        });
                        self.finish_geometry(materials, &reader);
                    }
                    Err(error) => self.fail(error),
                },
                Phase::Done => return self.queue.pop_front(),
            }
        }
        self.queue.pop_front()
    }

    fn finish_materials(&mut self, reader: &StageReader) {
        let materials = match mtl::parse(&reader.text()) {
            Ok(materials) => materials,
            Err(issue) => {
                return self.fail(LoadError::Parse {
                    stage: LoadStage::Materials,
                    path: reader.path.display().to_string(),
                    line: issue.line,
                    reason: issue.reason,
                });
            }
        };
        self.queue
            .push_back(LoadEvent::StageComplete(LoadStage::Materials));
        log::info!("material stage complete: {} materials", materials.len());

        // Stage (b) starts here and nowhere else: material availability is a
        // correctness precondition for geometry construction.
        let path = self.base.join(GEOMETRY_FILE);
        match StageReader::open(path, LoadStage::Geometry) {
            Ok(reader) => {
                self.geometry_started = true;
                self.phase = Phase::Geometry { materials, reader };
            }
            Err(error) => self.fail(error),
        }
    }

    fn finish_geometry(&mut self, materials: MaterialLib, reader: &StageReader) {
        match obj::parse(&reader.text(), &materials) {
            Ok(groups) => {
                log::info!("geometry stage complete: {} groups", groups.len());
                self.queue
                    .push_back(LoadEvent::StageComplete(LoadStage::Geometry));
                self.queue
                    .push_back(LoadEvent::Finished(ParsedAsset { materials, groups }));
            }
            Err(issue) => self.fail(LoadError::Parse {
                stage: LoadStage::Geometry,
                path: reader.path.display().to_string(),
                line: issue.line,
                reason: issue.reason,
            }),
        }
    }

    fn fail(&mut self, error: LoadError) {
        log::warn!("asset load failed: {error}");
        self.queue.push_back(LoadEvent::Failed(error));
        self.phase = Phase::Done;
    }
}

impl Iterator for AssetLoad {
    type Item = LoadEvent;

    fn next(&mut self) -> Option<LoadEvent> {
        self.pump()
    }
}

/// Materialize a successfully loaded asset as a subtree rooted at
/// `cellObject`, starting at the original's 0.1 uniform scale.
pub fn attach_asset(graph: &mut SceneGraph, asset: ParsedAsset) -> NodeId {
    let mut root = SceneNode::group(ASSET_ROOT_NAME);
    root.transform.scale = Vec3::splat(INITIAL_SCALE);
    let root_id = graph.add_root(root);

    for group in asset.groups {
        let material = group
            .material
            .as_deref()
            .and_then(|name| asset.materials.get(name))
            .unwrap_or_default();
        graph.add_child(root_id, SceneNode::mesh(group.name, material, group.bounds));
    }
    root_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::Path;

    fn scratch_dir(tag: &str) -> PathBuf {
        let nonce = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "cellviz_{}_{}_{}",
            tag,
            std::process::id(),
            nonce
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut file = File::create(dir.join(name)).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    const GOOD_MTL: &str = "newmtl inner\nKd 0.6 0.6 0.6\n";
    const GOOD_OBJ: &str = "o nucleus\nusemtl inner\nv -1 -1 -1\nv 1 1 1\n\
                            o mainBody\nv -9 -9 -9\nv 9 9 9\n";

    #[test]
    fn successful_load_orders_stages_and_completes_each_once() {
        let dir = scratch_dir("ok");
        write_file(&dir, MATERIAL_FILE, GOOD_MTL);
        write_file(&dir, GEOMETRY_FILE, GOOD_OBJ);

        let mut load = AssetLoad::new(&dir);
        let mut events = Vec::new();
        while let Some(event) = load.pump() {
            events.push(event);
        }

        let mut material_done = 0;
        let mut geometry_done = 0;
        let mut finished = 0;
        let mut last_ratio = [0.0f32; 2];
        for event in &events {
            match event {
                LoadEvent::Progress { stage, ratio } => {
                    let slot = match stage {
                        LoadStage::Materials => {
                            assert_eq!(geometry_done, 0, "material progress after geometry");
                            0
                        }
                        LoadStage::Geometry => {
                            assert_eq!(material_done, 1, "geometry began before materials");
                            1
                        }
                    };
                    assert!(*ratio >= last_ratio[slot], "progress regressed");
                    last_ratio[slot] = *ratio;
                }
                LoadEvent::StageComplete(LoadStage::Materials) => material_done += 1,
                LoadEvent::StageComplete(LoadStage::Geometry) => geometry_done += 1,
                LoadEvent::Finished(asset) => {
                    finished += 1;
                    assert_eq!(asset.groups.len(), 2);
                }
                LoadEvent::Failed(error) => panic!("unexpected failure: {error}"),
            }
        }
        assert_eq!((material_done, geometry_done, finished), (1, 1, 1));
        assert_eq!(last_ratio, [1.0, 1.0]);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn geometry_never_starts_when_materials_fail() {
        let dir = scratch_dir("badmtl");
        write_file(&dir, MATERIAL_FILE, "Kd 1 0 0\n");
        write_file(&dir, GEOMETRY_FILE, GOOD_OBJ);

        let mut load = AssetLoad::new(&dir);
        let mut failure = None;
        while let Some(event) = load.pump() {
            match event {
                LoadEvent::Progress { stage, .. } | LoadEvent::StageComplete(stage) => {
                    assert_eq!(stage, LoadStage::Materials);
                }
                LoadEvent::Failed(error) => failure = Some(error),
                LoadEvent::Finished(_) => panic!("load should not finish"),
            }
        }
        assert!(!load.geometry_started());
        assert_eq!(failure.unwrap().stage(), LoadStage::Materials);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn malformed_geometry_fails_without_completing_the_stage() {
        let dir = scratch_dir("badobj");
        write_file(&dir, MATERIAL_FILE, GOOD_MTL);
        // Fully readable but unparseable: a vertex before any group.
        write_file(&dir, GEOMETRY_FILE, "v 0 0 0\n");

        let mut load = AssetLoad::new(&dir);
        let mut geometry_completed = false;
        let mut failure = None;
        while let Some(event) = load.pump() {
            match event {
                LoadEvent::StageComplete(LoadStage::Geometry) => geometry_completed = true,
                LoadEvent::Failed(error) => failure = Some(error),
                LoadEvent::Finished(_) => panic!("load should not finish"),
                _ => {}
            }
        }
        assert!(!geometry_completed, "a failing stage must not complete");
        let error = failure.unwrap();
        assert_eq!(error.stage(), LoadStage::Geometry);
        assert!(matches!(error, LoadError::Parse { .. }));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_geometry_file_fails_the_geometry_stage() {
        let dir = scratch_dir("noobj");
        write_file(&dir, MATERIAL_FILE, GOOD_MTL);

        let mut load = AssetLoad::new(&dir);
        let mut failure = None;
        while let Some(event) = load.pump() {
            if let LoadEvent::Failed(error) = event {
                failure = Some(error);
            }
        }
        let error = failure.unwrap();
        assert_eq!(error.stage(), LoadStage::Geometry);
        assert!(matches!(error, LoadError::Io { .. }));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn attach_builds_pickable_subtree_at_initial_scale() {
        let materials = mtl::parse(GOOD_MTL).unwrap();
        let groups = obj::parse(GOOD_OBJ, &materials).unwrap();
        let mut graph = SceneGraph::new();
        let root = attach_asset(&mut graph, ParsedAsset { materials, groups });

        let root_node = graph.node(root);
        assert_eq!(root_node.name, ASSET_ROOT_NAME);
        assert_eq!(root_node.transform.scale, Vec3::splat(0.1));
        assert!(crate::scene::index::is_pickable(&root_node.name));
        assert_eq!(root_node.children().len(), 2);

        let nucleus = graph.node(root_node.children()[0]);
        assert_eq!(nucleus.material.unwrap().diffuse, Vec3::splat(0.6));
    }
}
