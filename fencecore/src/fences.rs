//! Fence layout: which files live in which fence, and where fences sit.

use crate::desktop_data::DesktopFile;
use crate::geometry::BoundingBox;
use crate::settings::FenceSettings;
use crate::snap::BoxSet;
use crate::storage::{SavedFence, SavedLayout};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const MIN_FENCE_WIDTH: f32 = 200.0;
pub const MIN_FENCE_HEIGHT: f32 = 120.0;

pub const PROGRAMS_ID: &str = "programs";
pub const OTHERS_ID: &str = "others";

#[derive(Debug, Clone, PartialEq)]
pub struct Fence {
    pub id: String,
    pub name: String,
    pub files: Vec<DesktopFile>,
    pub position: BoundingBox,
}

impl Fence {
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: BoundingBox) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            files: Vec::new(),
            position: with_min_size(position),
        }
    }

    /// One of the two fences files are grouped into on first start.
    fn default_for(id: &str) -> Self {
        if id == PROGRAMS_ID {
            Self::new(PROGRAMS_ID, "Programs", BoundingBox::new(100.0, 100.0, 380.0, 220.0))
        } else {
            Self::new(OTHERS_ID, "Default group", BoundingBox::new(520.0, 100.0, 380.0, 220.0))
        }
    }
}

fn with_min_size(b: BoundingBox) -> BoundingBox {
    BoundingBox::new(b.x, b.y, b.width.max(MIN_FENCE_WIDTH), b.height.max(MIN_FENCE_HEIGHT))
}

/// Fence a file is grouped into when no saved layout places it.
fn group_for(file: &DesktopFile, settings: &FenceSettings) -> &'static str {
    if settings.is_program(&file.ext) {
        PROGRAMS_ID
    } else {
        OTHERS_ID
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FenceLayout {
    fences: Vec<Fence>,
}

impl FenceLayout {
    pub fn new(fences: Vec<Fence>) -> Self {
        Self { fences }
    }

    /// Programs in one fence, everything else in another. File order is kept.
    pub fn from_files(files: Vec<DesktopFile>, settings: &FenceSettings) -> Self {
        let mut programs = Fence::default_for(PROGRAMS_ID);
        let mut others = Fence::default_for(OTHERS_ID);
        for file in files {
            if group_for(&file, settings) == PROGRAMS_ID {
                programs.files.push(file);
            } else {
                others.files.push(file);
            }
        }
        Self::new(vec![programs, others])
    }

    /// Rebuild the fences of a previous session around the current files.
    ///
    /// Saved files that are gone are dropped. Files the saved layout does not
    /// know are appended to their group's fence, which is created if needed.
    pub fn restore(files: Vec<DesktopFile>, saved: &SavedLayout, settings: &FenceSettings) -> Self {
        let order: Vec<PathBuf> = files.iter().map(|f| f.path.clone()).collect();
        let mut remaining: HashMap<PathBuf, DesktopFile> =
            files.into_iter().map(|f| (f.path.clone(), f)).collect();

        let mut fences: Vec<Fence> = saved
            .fences
            .iter()
            .map(|s| {
                let mut fence = Fence::new(s.id.clone(), s.name.clone(), s.position);
                fence.files = s.files.iter().filter_map(|p| remaining.remove(p)).collect();
                fence
            })
            .collect();

        for path in order {
            let Some(file) = remaining.remove(&path) else {
                continue;
            };
            let group = group_for(&file, settings);
            let index = match fences.iter().position(|f| f.id == group) {
                Some(index) => index,
                None => {
                    fences.push(Fence::default_for(group));
                    fences.len() - 1
                }
            };
            fences[index].files.push(file);
        }

        Self::new(fences)
    }

    pub fn to_saved(&self) -> SavedLayout {
        SavedLayout {
            fences: self
                .fences
                .iter()
                .map(|f| SavedFence {
                    id: f.id.clone(),
                    name: f.name.clone(),
                    position: f.position,
                    files: f.files.iter().map(|file| file.path.clone()).collect(),
                })
                .collect(),
        }
    }

    pub fn fences(&self) -> &[Fence] {
        &self.fences
    }

    pub fn get(&self, id: &str) -> Option<&Fence> {
        self.fences.iter().find(|f| f.id == id)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.fences.iter().position(|f| f.id == id)
    }

    pub fn file(&self, id: &str, index: usize) -> Option<&DesktopFile> {
        self.get(id).and_then(|f| f.files.get(index))
    }

    pub fn set_position(&mut self, id: &str, bounds: BoundingBox) -> bool {
        match self.index_of(id) {
            Some(i) => {
                self.fences[i].position = bounds;
                true
            }
            None => false,
        }
    }

    /// Snapshot of every fence's box for the snap engine.
    pub fn box_set(&self) -> BoxSet<String> {
        self.fences.iter().map(|f| (f.id.clone(), f.position)).collect()
    }

    /// Move a file to another slot, possibly in another fence.
    ///
    /// Returns `false` and leaves the layout alone when the slot is the same,
    /// a fence id is unknown or `from_index` is out of range. A `to_index`
    /// past the end appends.
    pub fn move_file(&mut self, from_id: &str, from_index: usize, to_id: &str, to_index: usize) -> bool {
        if from_id == to_id && from_index == to_index {
            return false;
        }
        let (Some(from), Some(to)) = (self.index_of(from_id), self.index_of(to_id)) else {
            return false;
        };
        if from_index >= self.fences[from].files.len() {
            return false;
        }
        let file = self.fences[from].files.remove(from_index);
        let target = &mut self.fences[to].files;
        target.insert(to_index.min(target.len()), file);
        true
    }

    /// Sort files of every fence by name, ignoring case.
    pub fn sort_files(&mut self, order: SortOrder) {
        for fence in &mut self.fences {
            fence.files.sort_by_key(|f| f.name.to_lowercase());
            if order == SortOrder::Descending {
                fence.files.reverse();
            }
        }
    }
}

/// Files selected inside one fence, in click order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    paths: Vec<PathBuf>,
}

impl Selection {
    /// Ctrl-click adds the file; a plain click selects only it.
    pub fn click(&mut self, path: PathBuf, ctrl: bool) {
        if !ctrl {
            self.paths.clear();
        }
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> DesktopFile {
        DesktopFile {
            name: name.to_string(),
            path: PathBuf::from("/desk").join(name),
            is_directory: false,
            is_file: true,
            ext: crate::desktop_data::extract_file_ext(name),
            icon: String::new(),
        }
    }

    fn names(layout: &FenceLayout, id: &str) -> Vec<String> {
        layout.get(id).unwrap().files.iter().map(|f| f.name.clone()).collect()
    }

    fn sample() -> FenceLayout {
        FenceLayout::from_files(
            vec![file("a.exe"), file("notes.txt"), file("b.lnk"), file("pic.png")],
            &FenceSettings::default(),
        )
    }

    #[test]
    fn test_grouping() {
        let layout = sample();
        assert_eq!(layout.fences().len(), 2);
        assert_eq!(names(&layout, PROGRAMS_ID), vec!["a.exe", "b.lnk"]);
        assert_eq!(names(&layout, OTHERS_ID), vec!["notes.txt", "pic.png"]);
        assert_eq!(layout.get(PROGRAMS_ID).unwrap().position, BoundingBox::new(100.0, 100.0, 380.0, 220.0));
        assert_eq!(layout.get(OTHERS_ID).unwrap().position, BoundingBox::new(520.0, 100.0, 380.0, 220.0));
    }

    #[test]
    fn test_move_between_fences() {
        let mut layout = sample();
        assert!(layout.move_file(OTHERS_ID, 0, PROGRAMS_ID, 1));
        assert_eq!(names(&layout, PROGRAMS_ID), vec!["a.exe", "notes.txt", "b.lnk"]);
        assert_eq!(names(&layout, OTHERS_ID), vec!["pic.png"]);
    }

    #[test]
    fn test_move_within_fence() {
        let mut layout = sample();
        assert!(layout.move_file(PROGRAMS_ID, 0, PROGRAMS_ID, 1));
        assert_eq!(names(&layout, PROGRAMS_ID), vec!["b.lnk", "a.exe"]);
    }

    #[test]
    fn test_move_past_end_appends() {
        let mut layout = sample();
        assert!(layout.move_file(PROGRAMS_ID, 0, OTHERS_ID, 99));
        assert_eq!(names(&layout, OTHERS_ID), vec!["notes.txt", "pic.png", "a.exe"]);
    }

    #[test]
    fn test_move_rejected() {
        let mut layout = sample();
        let before = layout.clone();
        assert!(!layout.move_file(PROGRAMS_ID, 1, PROGRAMS_ID, 1));
        assert!(!layout.move_file("nope", 0, PROGRAMS_ID, 0));
        assert!(!layout.move_file(PROGRAMS_ID, 0, "nope", 0));
        assert!(!layout.move_file(PROGRAMS_ID, 5, OTHERS_ID, 0));
        assert_eq!(layout, before);
    }

    #[test]
    fn test_sort() {
        let mut layout = FenceLayout::from_files(
            vec![file("b.txt"), file("C.txt"), file("a.txt")],
            &FenceSettings::default(),
        );
        layout.sort_files(SortOrder::Ascending);
        assert_eq!(names(&layout, OTHERS_ID), vec!["a.txt", "b.txt", "C.txt"]);
        layout.sort_files(SortOrder::Descending);
        assert_eq!(names(&layout, OTHERS_ID), vec!["C.txt", "b.txt", "a.txt"]);
    }

    #[test]
    fn test_box_set_and_set_position() {
        let mut layout = sample();
        let moved = BoundingBox::new(0.0, 0.0, 250.0, 150.0);
        assert!(layout.set_position(PROGRAMS_ID, moved));
        assert!(!layout.set_position("nope", moved));
        let boxes = layout.box_set();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes.get(&PROGRAMS_ID.to_string()), Some(moved));
    }

    #[test]
    fn test_restore_keeps_saved_order_and_adds_new_files() {
        let saved = SavedLayout {
            fences: vec![
                SavedFence {
                    id: "work".into(),
                    name: "Work".into(),
                    position: BoundingBox::new(10.0, 10.0, 300.0, 200.0),
                    files: vec!["/desk/notes.txt".into(), "/desk/gone.txt".into(), "/desk/a.exe".into()],
                },
                SavedFence {
                    id: OTHERS_ID.into(),
                    name: "Misc".into(),
                    position: BoundingBox::new(400.0, 10.0, 50.0, 50.0),
                    files: vec![],
                },
            ],
        };
        let layout = FenceLayout::restore(
            vec![file("a.exe"), file("notes.txt"), file("b.lnk"), file("pic.png")],
            &saved,
            &FenceSettings::default(),
        );

        let ids: Vec<&str> = layout.fences().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["work", OTHERS_ID, PROGRAMS_ID]);
        assert_eq!(names(&layout, "work"), vec!["notes.txt", "a.exe"]);
        assert_eq!(names(&layout, OTHERS_ID), vec!["pic.png"]);
        assert_eq!(names(&layout, PROGRAMS_ID), vec!["b.lnk"]);
        // saved sizes below the minimum are grown back
        let misc = layout.get(OTHERS_ID).unwrap().position;
        assert_eq!((misc.width, misc.height), (MIN_FENCE_WIDTH, MIN_FENCE_HEIGHT));
    }

    #[test]
    fn test_to_saved_lists_paths() {
        let saved = sample().to_saved();
        assert_eq!(saved.fences.len(), 2);
        assert_eq!(
            saved.fences[0].files,
            vec![PathBuf::from("/desk/a.exe"), PathBuf::from("/desk/b.lnk")]
        );
    }

    #[test]
    fn test_selection() {
        let mut sel = Selection::default();
        let a = PathBuf::from("/desk/a");
        let b = PathBuf::from("/desk/b");
        sel.click(a.clone(), false);
        sel.click(b.clone(), true);
        sel.click(b.clone(), true);
        assert_eq!(sel.paths(), &[a.clone(), b.clone()]);
        sel.click(a.clone(), false);
        assert_eq!(sel.paths(), &[a.clone()]);
        sel.clear();
        assert!(sel.is_empty());
        assert!(!sel.contains(&a));
    }
}
