// LogAnalyzer - platform/tasks.rs
//
// Loading of the JSON task list: an array of `{"id", "path", "type"}`
// objects. Every problem is reported here, before the engine runs.

use crate::core::model::TaskDescriptor;
use crate::util::constants::MAX_TASK_LIST_SIZE;
use crate::util::error::TaskListError;
use std::path::Path;

/// Read, parse, and validate a task list file.
pub fn load_tasks(path: &Path) -> Result<Vec<TaskDescriptor>, TaskListError> {
    let io_err = |source| TaskListError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > MAX_TASK_LIST_SIZE {
        return Err(TaskListError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: MAX_TASK_LIST_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(io_err)?;
    let tasks: Vec<TaskDescriptor> =
        serde_json::from_str(&content).map_err(|source| TaskListError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    validate(&tasks)?;

    tracing::info!(path = %path.display(), tasks = tasks.len(), "Loaded task list");
    Ok(tasks)
}

/// Reject entries the engine cannot meaningfully run.
fn validate(tasks: &[TaskDescriptor]) -> Result<(), TaskListError> {
    for (index, task) in tasks.iter().enumerate() {
        if task.id.trim().is_empty() {
            return Err(TaskListError::EmptyField { index, field: "id" });
        }
        if task.target.trim().is_empty() {
            return Err(TaskListError::EmptyField {
                index,
                field: "path",
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("tasks.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"[
                {"id": "web-server-1", "path": "/var/log/nginx/access.log", "type": "nginx-access"},
                {"id": "app-backend-2", "path": "/var/log/app/errors.log", "type": "custom-app"}
            ]"#,
        );

        let tasks = load_tasks(&path).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, "web-server-1");
        assert_eq!(tasks[1].target, "/var/log/app/errors.log");
        assert_eq!(tasks[1].kind, "custom-app");
    }

    #[test]
    fn test_load_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[]");
        assert!(load_tasks(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_tasks(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(TaskListError::Io { .. })), "got {result:?}");
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, r#"{"id": "not-an-array"}"#);
        let result = load_tasks(&path);
        assert!(matches!(result, Err(TaskListError::Parse { .. })), "got {result:?}");
    }

    #[test]
    fn test_empty_path_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, r#"[{"id": "a", "path": "/x.log"}, {"id": "b", "path": "  "}]"#);
        let result = load_tasks(&path);
        assert!(
            matches!(
                result,
                Err(TaskListError::EmptyField {
                    index: 1,
                    field: "path"
                })
            ),
            "got {result:?}"
        );
    }

    #[test]
    fn test_empty_id_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, r#"[{"id": "", "path": "/x.log"}]"#);
        assert!(matches!(
            load_tasks(&path),
            Err(TaskListError::EmptyField { field: "id", .. })
        ));
    }
}
