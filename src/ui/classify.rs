#![allow(dead_code)]
//! 파일 분류 서비스
//!
//! 패널 행 색상을 정하기 위해 엔트리를 카테고리 태그로 분류한다.
//! 뷰 레이어 전용이며 코어 로직은 여기에 의존하지 않는다. 전역 핸들
//! 대신 앱이 소유한 컨텍스트 값으로 전달된다.

use crate::models::dir_entry::{DirEntry, EntryKind};

/// 분류 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    /// 디렉토리
    Directory,
    /// 실행 파일
    Executable,
    /// 텍스트/소스
    Text,
    /// 압축/아카이브
    Archive,
    /// 이미지/영상/음원
    Media,
    /// 그 외
    Other,
}

/// 확장자 기반 분류기
pub struct FileClassifier;

const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "rs", "toml", "json", "yaml", "yml", "c", "h", "py", "sh", "log", "cfg", "conf",
    "ini", "xml", "html", "css", "js", "ts",
];

const ARCHIVE_EXTENSIONS: &[&str] = &[
    "zip", "tar", "gz", "tgz", "bz2", "xz", "zst", "rar", "7z",
];

const MEDIA_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "svg", "webp", "mp3", "ogg", "flac", "wav", "mp4", "mkv",
    "avi", "webm", "mov",
];

impl FileClassifier {
    /// 새 분류기 생성
    pub fn new() -> Self {
        Self
    }

    /// 엔트리를 카테고리로 분류
    pub fn classify(&self, entry: &DirEntry) -> FileCategory {
        match entry.kind {
            EntryKind::Directory => FileCategory::Directory,
            EntryKind::Other => FileCategory::Other,
            EntryKind::File => {
                if entry.executable {
                    return FileCategory::Executable;
                }

                let extension = entry
                    .name
                    .rsplit_once('.')
                    .map(|(_, ext)| ext.to_ascii_lowercase());

                match extension.as_deref() {
                    Some(ext) if TEXT_EXTENSIONS.contains(&ext) => FileCategory::Text,
                    Some(ext) if ARCHIVE_EXTENSIONS.contains(&ext) => FileCategory::Archive,
                    Some(ext) if MEDIA_EXTENSIONS.contains(&ext) => FileCategory::Media,
                    _ => FileCategory::Other,
                }
            }
        }
    }
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::new()
    }
}
