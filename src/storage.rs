use crate::agenda::Agenda;
use crate::store::DiaryStore;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const PROJECT_DIR: &str = ".domeer";
const DIARY_FILE: &str = "diary.yml";

/// Everything a session persists between invocations. Holidays are fetched
/// fresh and never written.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Diary {
    #[serde(default)]
    pub items: DiaryStore,
    #[serde(default)]
    pub agenda: Agenda,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiaryScope {
    Project,
    Global,
}

#[derive(Debug, Clone)]
pub struct DiaryLocation {
    pub path: PathBuf,
    pub scope: DiaryScope,
}

pub fn init_project_diary() -> Result<DiaryLocation> {
    init_project_diary_in(&env::current_dir()?)
}

/// Creates `.domeer/diary.yml` under `root`. An existing diary is kept.
fn init_project_diary_in(root: &Path) -> Result<DiaryLocation> {
    let location = DiaryLocation {
        path: project_diary_path(root),
        scope: DiaryScope::Project,
    };
    if location.path.exists() {
        log::info!("diary already present at {:?}", location.path);
    } else {
        save_diary(&location, &Diary::default())?;
    }
    Ok(location)
}

pub fn locate_diary(start: &Path) -> Result<DiaryLocation> {
    if let Some(project_path) = find_project_diary(start) {
        return Ok(DiaryLocation {
            path: project_path,
            scope: DiaryScope::Project,
        });
    }
    Ok(DiaryLocation {
        path: global_diary_path()?,
        scope: DiaryScope::Global,
    })
}

pub fn load_diary(location: &DiaryLocation) -> Result<Diary> {
    if !location.path.exists() {
        return Ok(Diary::default());
    }
    let data = fs::read_to_string(&location.path)
        .with_context(|| format!("reading {:?}", location.path))?;
    let diary: Diary = serde_yaml::from_str(&data).context("parsing diary file")?;
    Ok(diary)
}

pub fn save_diary(location: &DiaryLocation, diary: &Diary) -> Result<()> {
    if let Some(parent) = location.path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }
    let serialized = serde_yaml::to_string(diary).context("serializing diary")?;
    fs::write(&location.path, serialized)
        .with_context(|| format!("writing {:?}", location.path))?;
    log::debug!("saved diary to {:?}", location.path);
    Ok(())
}

fn find_project_diary(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = project_diary_path(current);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

fn project_diary_path(root: &Path) -> PathBuf {
    root.join(PROJECT_DIR).join(DIARY_FILE)
}

fn global_diary_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "domeer").context("locating data directory")?;
    Ok(dirs.data_dir().join(DIARY_FILE))
}
