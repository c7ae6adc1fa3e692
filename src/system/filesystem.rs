#![allow(dead_code)]

use crate::models::dir_entry::{DirEntry, EntryKind};
use crate::utils::error::{DuoDirError, Result};
use std::ffi::OsString;
use std::fs::{self, File, Metadata, OpenOptions};
use std::path::{Path, PathBuf};

/// 파일 시스템 모듈
///
/// 코어가 소비하는 파일 시스템 서비스. 모든 I/O는 여기를 통한다.
pub struct FileSystem;

impl FileSystem {
    /// 새 파일 시스템 인스턴스 생성
    pub fn new() -> Self {
        Self
    }

    /// 디렉토리 읽기
    ///
    /// 주어진 경로의 실제 엔트리를 이름순으로 정렬해 반환한다.
    /// `.`/`..` 의사 엔트리는 포함하지 않는다 (패널이 추가).
    pub fn read_directory(&self, path: &Path) -> Result<Vec<DirEntry>> {
        if !path.exists() {
            return Err(DuoDirError::PathNotFound {
                path: path.to_path_buf(),
            });
        }

        if !path.is_dir() {
            return Err(DuoDirError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        let read_dir = fs::read_dir(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                DuoDirError::PermissionDenied {
                    path: path.to_path_buf(),
                }
            } else {
                DuoDirError::Io(e)
            }
        })?;

        let mut entries = Vec::new();

        for entry in read_dir {
            // 에러 발생 시 해당 엔트리는 스킵
            let Ok(entry) = entry else { continue };

            let entry_path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            // 심볼릭 링크는 대상 기준으로 분류, 깨진 링크는 Other
            let (kind, metadata) = match fs::metadata(&entry_path) {
                Ok(meta) if meta.is_dir() => (EntryKind::Directory, Some(meta)),
                Ok(meta) if meta.is_file() => (EntryKind::File, Some(meta)),
                Ok(meta) => (EntryKind::Other, Some(meta)),
                Err(_) => (EntryKind::Other, None),
            };

            let size = match (&kind, &metadata) {
                (EntryKind::File, Some(meta)) => meta.len(),
                _ => 0,
            };

            let modified = metadata
                .as_ref()
                .and_then(|m| m.modified().ok())
                .unwrap_or(std::time::SystemTime::UNIX_EPOCH);

            let executable = Self::is_executable(kind, metadata.as_ref());

            entries.push(DirEntry::new(name, kind, size, modified, executable));
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// 실행 권한 여부 판단 (Unix 전용, 일반 파일만)
    fn is_executable(kind: EntryKind, metadata: Option<&Metadata>) -> bool {
        if kind != EntryKind::File {
            return false;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            return metadata
                .map(|m| m.permissions().mode() & 0o111 != 0)
                .unwrap_or(false);
        }

        #[cfg(not(unix))]
        {
            let _ = metadata;
            false
        }
    }

    /// 경로 stat (심볼릭 링크는 대상 추적)
    pub fn stat(&self, path: &Path) -> Result<Metadata> {
        fs::metadata(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DuoDirError::PathNotFound {
                    path: path.to_path_buf(),
                }
            } else if e.kind() == std::io::ErrorKind::PermissionDenied {
                DuoDirError::PermissionDenied {
                    path: path.to_path_buf(),
                }
            } else {
                DuoDirError::Io(e)
            }
        })
    }

    /// 경로 존재 확인
    pub fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// 디렉토리 여부 확인
    pub fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    /// 경로 정규화 (`.`/`..`/심볼릭 링크를 절대 경로로 해석)
    pub fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        fs::canonicalize(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                DuoDirError::PermissionDenied {
                    path: path.to_path_buf(),
                }
            } else {
                DuoDirError::ResolveFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })
    }

    /// 새 디렉토리 생성
    pub fn create_directory(&self, path: &Path) -> Result<()> {
        if path.exists() {
            return Err(DuoDirError::FileExists {
                path: path.to_path_buf(),
            });
        }

        fs::create_dir(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                DuoDirError::PermissionDenied {
                    path: path.to_path_buf(),
                }
            } else {
                DuoDirError::Io(e)
            }
        })
    }

    /// 원자적 rename 시도
    pub fn rename(&self, src: &Path, dest: &Path) -> Result<()> {
        fs::rename(src, dest).map_err(|e| DuoDirError::RenameFailed {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// 단일 파일 삭제
    pub fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                DuoDirError::PermissionDenied {
                    path: path.to_path_buf(),
                }
            } else {
                DuoDirError::DeleteFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })
    }

    /// 빈 디렉토리 삭제
    pub fn remove_empty_directory(&self, path: &Path) -> Result<()> {
        fs::remove_dir(path).map_err(|e| DuoDirError::DeleteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// 디렉토리의 하위 이름 목록 (`.`/`..` 제외, 이름순)
    pub fn list_child_names(&self, path: &Path) -> Result<Vec<OsString>> {
        let read_dir = fs::read_dir(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                DuoDirError::PermissionDenied {
                    path: path.to_path_buf(),
                }
            } else {
                DuoDirError::Io(e)
            }
        })?;

        let mut names: Vec<OsString> = read_dir
            .filter_map(|entry| entry.ok().map(|e| e.file_name()))
            .collect();
        names.sort();
        Ok(names)
    }

    /// 읽기 전용으로 파일 열기
    pub fn open_for_read(&self, path: &Path) -> Result<File> {
        File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                DuoDirError::PermissionDenied {
                    path: path.to_path_buf(),
                }
            } else {
                DuoDirError::Io(e)
            }
        })
    }

    /// 쓰기/생성/잘라내기로 파일 열기 (소스의 모드 비트 적용)
    pub fn open_for_create(&self, path: &Path, mode: u32) -> Result<File> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }

        #[cfg(not(unix))]
        {
            let _ = mode;
        }

        options.open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                DuoDirError::PermissionDenied {
                    path: path.to_path_buf(),
                }
            } else {
                DuoDirError::Io(e)
            }
        })
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}
