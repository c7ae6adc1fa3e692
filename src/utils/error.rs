#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuoDirError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Path already exists: {path}")]
    FileExists { path: PathBuf },

    #[error("Cannot resolve path: {path} ({reason})")]
    ResolveFailed { path: PathBuf, reason: String },

    #[error("Copy failed: {src} -> {dest} ({reason})")]
    CopyFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Move failed: {src} -> {dest} ({reason})")]
    MoveFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Delete failed: {path} ({reason})")]
    DeleteFailed { path: PathBuf, reason: String },

    #[error("Rename failed: {src} -> {dest} ({reason})")]
    RenameFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Editor failed: {reason}")]
    EditorFailed { reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DuoDirError>;
