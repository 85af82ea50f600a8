use crate::config::constants;
use crate::error::{WalkthroughError, WalkthroughResult};
use crate::logging::ActivityLog;
use crate::pipeline::{NodeResult, PipeMap, PipeNode};
use crate::util::file::{FileInfo, ensure_dir, list_names, move_file, remove_file_in};
use crate::util::prompt::{BoxedPrompt, Prompt};
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// The names file written by the walkthrough
#[derive(Debug, Clone)]
pub struct RecordsFile {
    pub name: String,
    pub path: PathBuf,
}

/// Folder setup node - make sure the working folder exists
pub struct FolderSetupNode;

impl PipeNode for FolderSetupNode {
    fn name(&self) -> String {
        "FolderSetup".to_string()
    }

    fn input(&self) -> Vec<String> {
        vec!["folder".to_string()]
    }

    fn output(&self) -> Vec<String> {
        vec!["folder_path".to_string(), "activity_log".to_string()]
    }

    fn process(&self, mut data: PipeMap) -> NodeResult<PipeMap> {
        let folder = data
            .get::<PathBuf>("folder")
            .ok_or("Missing folder input")?
            .clone();

        let created =
            ensure_dir(&folder).map_err(|e| WalkthroughError::folder_create(&folder, e))?;
        if created {
            info!("Folder '{}' created.", folder.display());
        } else {
            info!("Folder '{}' already exists.", folder.display());
        }

        let absolute = folder
            .canonicalize()
            .map_err(|e| WalkthroughError::folder_create(&folder, e))?;
        info!("Absolute path: {}", absolute.display());

        data.insert("activity_log", ActivityLog::in_folder(&absolute));
        data.insert("folder_path", absolute);
        Ok(data)
    }
}

/// Records file node - ask for student names and write them to today's file
pub struct RecordsFileNode;

impl PipeNode for RecordsFileNode {
    fn name(&self) -> String {
        "RecordsFile".to_string()
    }

    fn input(&self) -> Vec<String> {
        vec![
            "folder_path".to_string(),
            "activity_log".to_string(),
            "prompt".to_string(),
            "name_count?".to_string(),
        ]
    }

    fn output(&self) -> Vec<String> {
        vec!["records_file".to_string()]
    }

    fn process(&self, mut data: PipeMap) -> NodeResult<PipeMap> {
        let folder = data
            .get::<PathBuf>("folder_path")
            .ok_or("Missing folder_path input")?
            .clone();
        let log = data
            .get::<ActivityLog>("activity_log")
            .ok_or("Missing activity_log input")?
            .clone();
        let count = data
            .get::<usize>("name_count")
            .copied()
            .unwrap_or(constants::NAME_COUNT);
        let prompt = data
            .get_mut::<BoxedPrompt>("prompt")
            .ok_or("Missing prompt input")?;

        let file_name = constants::records_file_name(Local::now().date_naive());
        let path = folder.join(&file_name);

        let written = collect_names(&mut **prompt, count, &file_name).and_then(|names| {
            let content: String = names.iter().map(|name| format!("{name}\n")).collect();
            std::fs::write(&path, content)
                .map_err(|e| WalkthroughError::records_file(&file_name, e))
        });

        if let Err(e) = written {
            log.append(&format!("ERROR creating {file_name}: {e}"));
            return Err(Box::new(e));
        }

        info!(
            "Success: '{}' created at {}.",
            file_name,
            Local::now().format(constants::TIMESTAMP_FORMAT)
        );
        log.append(&format!("{file_name} created successfully."));

        data.insert(
            "records_file",
            RecordsFile {
                name: file_name,
                path,
            },
        );
        Ok(data)
    }
}

/// Ask until `count` non-blank names were given
pub fn collect_names(
    prompt: &mut dyn Prompt,
    count: usize,
    file_name: &str,
) -> WalkthroughResult<Vec<String>> {
    info!("Enter {} student names. Press Enter after each name.", count);

    let mut names = Vec::with_capacity(count);
    while names.len() < count {
        let answer = prompt
            .ask(&format!("Name {}: ", names.len() + 1))
            .map_err(|e| WalkthroughError::records_file(file_name, e))?
            .ok_or(WalkthroughError::InputClosed {
                expected: count,
                received: names.len(),
            })?;

        let name = answer.trim();
        if name.is_empty() {
            info!("Empty name ignored, please enter a valid name.");
        } else {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// File inspector node - show contents, size and modification time
pub struct FileInspectorNode;

impl PipeNode for FileInspectorNode {
    fn name(&self) -> String {
        "FileInspector".to_string()
    }

    fn input(&self) -> Vec<String> {
        vec!["records_file".to_string(), "activity_log".to_string()]
    }

    fn output(&self) -> Vec<String> {
        vec!["file_info".to_string()]
    }

    fn process(&self, mut data: PipeMap) -> NodeResult<PipeMap> {
        let records_file = data
            .get::<RecordsFile>("records_file")
            .ok_or("Missing records_file input")?;
        let log = data
            .get::<ActivityLog>("activity_log")
            .ok_or("Missing activity_log input")?;

        let file_info = match inspect(&records_file.path) {
            Ok(file_info) => Some(file_info),
            Err(e) => {
                log.append(&format!(
                    "ERROR reading {}: {}",
                    records_file.path.display(),
                    e
                ));
                error!("{}", WalkthroughError::Inspect(e));
                None
            }
        };

        data.insert("file_info", file_info);
        Ok(data)
    }
}

fn inspect(path: &Path) -> std::io::Result<FileInfo> {
    info!("--- File contents ---");
    let contents = std::fs::read_to_string(path)?;
    let trimmed = contents.trim();
    info!("{}", if trimmed.is_empty() { "(file empty)" } else { trimmed });

    let file_info = FileInfo::read(path)?;
    info!("File size: {} bytes", file_info.size);
    info!("Last modified: {}", file_info.modified_display());
    Ok(file_info)
}

/// Backup archive node - copy the records file and move the copy into the archive
pub struct BackupArchiveNode;

impl PipeNode for BackupArchiveNode {
    fn name(&self) -> String {
        "BackupArchive".to_string()
    }

    fn input(&self) -> Vec<String> {
        vec![
            "folder_path".to_string(),
            "records_file".to_string(),
            "activity_log".to_string(),
        ]
    }

    fn output(&self) -> Vec<String> {
        vec!["archive_dir".to_string()]
    }

    fn process(&self, mut data: PipeMap) -> NodeResult<PipeMap> {
        let folder = data
            .get::<PathBuf>("folder_path")
            .ok_or("Missing folder_path input")?;
        let records_file = data
            .get::<RecordsFile>("records_file")
            .ok_or("Missing records_file input")?;
        let log = data
            .get::<ActivityLog>("activity_log")
            .ok_or("Missing activity_log input")?;

        let archive_dir = match archive(folder, &records_file.name) {
            Ok(archive_dir) => {
                log.append(&format!(
                    "{} created and archived successfully.",
                    records_file.name
                ));
                Some(archive_dir)
            }
            Err(e) => {
                log.append(&format!(
                    "ERROR during backup/archive of {}: {}",
                    records_file.name, e
                ));
                error!("{}", WalkthroughError::Archive(e));
                None
            }
        };

        data.insert("archive_dir", archive_dir);
        Ok(data)
    }
}

fn archive(folder: &Path, file_name: &str) -> std::io::Result<PathBuf> {
    let backup_name = format!("{}{}", constants::BACKUP_PREFIX, file_name);
    let backup_path = folder.join(&backup_name);

    std::fs::copy(folder.join(file_name), &backup_path)?;
    info!("Backup created: {}", backup_name);

    let archive_dir = folder.join(constants::ARCHIVE_DIR);
    if ensure_dir(&archive_dir)? {
        info!("{} folder created.", constants::ARCHIVE_DIR);
    }

    move_file(&backup_path, &archive_dir.join(&backup_name))?;
    info!("Backup moved to {}/{}", constants::ARCHIVE_DIR, backup_name);

    info!("Files in {}:", constants::ARCHIVE_DIR);
    for name in list_names(&archive_dir)? {
        info!(" - {}", name);
    }
    Ok(archive_dir)
}

/// File removal node - optionally delete one file chosen by the user
pub struct FileRemovalNode;

impl PipeNode for FileRemovalNode {
    fn name(&self) -> String {
        "FileRemoval".to_string()
    }

    fn input(&self) -> Vec<String> {
        vec![
            "folder_path".to_string(),
            "activity_log".to_string(),
            "prompt".to_string(),
            "folder_label?".to_string(),
        ]
    }

    fn output(&self) -> Vec<String> {
        vec!["removed_file".to_string()]
    }

    fn process(&self, mut data: PipeMap) -> NodeResult<PipeMap> {
        let folder = data
            .get::<PathBuf>("folder_path")
            .ok_or("Missing folder_path input")?
            .clone();
        let log = data
            .get::<ActivityLog>("activity_log")
            .ok_or("Missing activity_log input")?
            .clone();
        let label = data
            .get::<String>("folder_label")
            .cloned()
            .unwrap_or_else(|| constants::BASE_FOLDER.to_string());
        let prompt = data
            .get_mut::<BoxedPrompt>("prompt")
            .ok_or("Missing prompt input")?;

        let removed = match offer_removal(&mut **prompt, &folder, &label, &log) {
            Ok(removed) => removed,
            Err(e) => {
                log.append(&format!("ERROR during advanced file ops: {e}"));
                error!("{}", WalkthroughError::Removal(e));
                None
            }
        };

        data.insert("removed_file", removed);
        Ok(data)
    }
}

fn offer_removal(
    prompt: &mut dyn Prompt,
    folder: &Path,
    label: &str,
    log: &ActivityLog,
) -> std::io::Result<Option<String>> {
    let answer = prompt.ask(&format!(
        "Would you like to delete a file from {label}? (Yes/No): "
    ))?;

    let mut removed = None;
    if answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("yes")) {
        info!("Current files in {}:", label);
        for name in list_names(folder)? {
            info!(" - {}", name);
        }

        let target = prompt
            .ask("Enter the exact file name to delete (include extension): ")?
            .unwrap_or_default();
        let target = target.trim();

        if remove_file_in(folder, target)? {
            info!("'{}' deleted.", target);
            log.append(&format!("{target} deleted by user."));
            removed = Some(target.to_string());
        } else {
            info!("File '{}' not found.", target);
            log.append(&format!(
                "Attempted to delete '{target}' but file not found."
            ));
        }
    } else {
        debug!("User declined deletion");
        info!("Skipping deletion step.");
    }

    info!("Remaining files in {}:", label);
    for name in list_names(folder)? {
        info!(" - {}", name);
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::prompt::ScriptedPrompt;

    #[test]
    fn test_collect_names_skips_blanks() {
        let mut prompt = ScriptedPrompt::new(["Ann", "  ", "", " Bo "]);
        let names = collect_names(&mut prompt, 2, "records.txt").unwrap();
        assert_eq!(names, vec!["Ann", "Bo"]);
        assert_eq!(prompt.asked().len(), 4);
        assert_eq!(prompt.asked()[3], "Name 2: ");
    }

    #[test]
    fn test_collect_names_input_closed() {
        let mut prompt = ScriptedPrompt::new(["Ann"]);
        let err = collect_names(&mut prompt, 3, "records.txt").unwrap_err();
        assert!(matches!(
            err,
            WalkthroughError::InputClosed {
                expected: 3,
                received: 1
            }
        ));
    }

    #[test]
    fn test_offer_removal_declined() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("keep.txt"), "x").unwrap();
        let log = ActivityLog::in_folder(dir.path());

        let mut prompt = ScriptedPrompt::new(["No"]);
        let removed = offer_removal(&mut prompt, dir.path(), "StudentFiles", &log).unwrap();
        assert_eq!(removed, None);
        assert!(dir.path().join("keep.txt").exists());
        assert!(!log.path().exists());
    }

    #[test]
    fn test_offer_removal_outside_folder_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let inner = dir.path().join("StudentFiles");
        std::fs::create_dir(&inner).unwrap();
        std::fs::write(dir.path().join("outside.txt"), "x").unwrap();
        let log = ActivityLog::in_folder(&inner);

        let mut prompt = ScriptedPrompt::new(["YES", "../outside.txt"]);
        let removed = offer_removal(&mut prompt, &inner, "StudentFiles", &log).unwrap();
        assert_eq!(removed, None);
        assert!(dir.path().join("outside.txt").exists());

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert!(content.contains("Attempted to delete '../outside.txt' but file not found."));
    }

    #[test]
    fn test_archive_replaces_previous_backup() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("records.txt"), "Ann\n").unwrap();
        archive(dir.path(), "records.txt").unwrap();

        std::fs::write(dir.path().join("records.txt"), "Bo\n").unwrap();
        let archive_dir = archive(dir.path(), "records.txt").unwrap();

        let backup = archive_dir.join("backup_records.txt");
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "Bo\n");
        assert!(!dir.path().join("backup_records.txt").exists());
    }

    fn node_input(folder: &Path, file_name: &str) -> PipeMap {
        let mut data = PipeMap::new();
        data.insert("folder_path", folder.to_path_buf());
        data.insert("activity_log", ActivityLog::in_folder(folder));
        data.insert(
            "records_file",
            RecordsFile {
                name: file_name.to_string(),
                path: folder.join(file_name),
            },
        );
        data
    }

    #[test]
    fn test_inspect_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.txt");
        std::fs::write(&path, "").unwrap();

        let file_info = inspect(&path).unwrap();
        assert_eq!(file_info.size, 0);
        assert_eq!(file_info.path, path);
    }

    #[test]
    fn test_inspector_logs_missing_file_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let data = node_input(dir.path(), "records.txt");

        let result = FileInspectorNode.process(data).unwrap();
        assert!(result.get::<Option<FileInfo>>("file_info").unwrap().is_none());

        let log = std::fs::read_to_string(dir.path().join(constants::LOG_FILE)).unwrap();
        let expected = format!("ERROR reading {}: ", dir.path().join("records.txt").display());
        assert!(log.contains(&expected));
    }

    #[test]
    fn test_backup_logs_blocked_archive_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("records.txt"), "Ann\n").unwrap();
        std::fs::write(dir.path().join(constants::ARCHIVE_DIR), "not a folder").unwrap();
        let data = node_input(dir.path(), "records.txt");

        let result = BackupArchiveNode.process(data).unwrap();
        assert!(result.get::<Option<PathBuf>>("archive_dir").unwrap().is_none());

        let log = std::fs::read_to_string(dir.path().join(constants::LOG_FILE)).unwrap();
        assert!(log.contains("ERROR during backup/archive of records.txt: "));
        assert!(!log.contains("archived successfully"));
    }
}
