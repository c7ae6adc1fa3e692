#![allow(dead_code)]
//! 재귀 트리 작업 엔진
//!
//! 파일/디렉토리 복사, 이동, 삭제를 서브트리 전체에 깊이 우선(전위)으로
//! 적용한다. 실패 정책: 자식에서의 실패는 그 가지만 중단하고 형제 처리는
//! 계속한다. 롤백은 없으므로 중간 실패 시 부분 트리가 남을 수 있다.

use crate::models::operation::Operation;
use crate::system::filesystem::FileSystem;
use crate::utils::error::{DuoDirError, Result};
use std::fs::Metadata;
use std::io::{Read, Write};
use std::path::Path;

/// 파일 복사에 쓰는 중간 버퍼 크기
const COPY_BUF_SIZE: usize = 8192;

/// 트리 작업 엔진
pub struct TreeEngine<'a> {
    filesystem: &'a FileSystem,
}

impl<'a> TreeEngine<'a> {
    /// 새 엔진 생성
    pub fn new(filesystem: &'a FileSystem) -> Self {
        Self { filesystem }
    }

    /// 트리 작업 실행 (단일 진입점)
    pub fn process_tree(&self, operation: &Operation) -> Result<()> {
        match operation {
            Operation::Copy { source, dest } => self.copy_tree(source, dest),
            Operation::Move { source, dest } => self.move_tree(source, dest),
            Operation::Delete { source } => self.delete_tree(source),
        }
    }

    /// 이동
    ///
    /// 소스와 대상이 (정규화 기준) 같은 경로면 아무 것도 하지 않는다.
    /// 먼저 원자적 rename을 시도하고, 성공하면 서브트리 전체가 한 번에
    /// 끝난다. rename 실패 사유는 구분하지 않고 복사+삭제로 폴백한다.
    fn move_tree(&self, src: &Path, dest: &Path) -> Result<()> {
        let metadata = self.filesystem.stat(src)?;

        if self.is_same_path(src, dest) {
            return Ok(());
        }

        if self.filesystem.rename(src, dest).is_ok() {
            return Ok(());
        }

        if metadata.is_dir() {
            self.filesystem.create_directory(dest)?;

            let mut first_err = None;
            for name in self.filesystem.list_child_names(src)? {
                let result = self.move_tree(&src.join(&name), &dest.join(&name));
                if let Err(e) = result {
                    first_err.get_or_insert(e);
                }
            }

            // 자식이 하나라도 실패하면 소스는 비어 있지 않다
            match first_err {
                None => self.filesystem.remove_empty_directory(src),
                Some(e) => Err(e),
            }
        } else {
            // 복사가 끝까지 성공했을 때만 소스를 지운다
            self.copy_file(src, dest, &metadata)?;
            self.filesystem.remove_file(src)
        }
    }

    /// 복사
    ///
    /// 디렉토리는 대상 생성에 실패하면 하위로 진행하지 않고 중단한다.
    /// 파일은 소스의 모드 비트로 생성해 블록 단위로 스트림 복사한다.
    /// 타임스탬프/소유자/확장 속성은 보존하지 않는다.
    fn copy_tree(&self, src: &Path, dest: &Path) -> Result<()> {
        let metadata = self.filesystem.stat(src)?;

        if metadata.is_dir() {
            self.filesystem.create_directory(dest)?;

            let mut first_err = None;
            for name in self.filesystem.list_child_names(src)? {
                let result = self.copy_tree(&src.join(&name), &dest.join(&name));
                if let Err(e) = result {
                    first_err.get_or_insert(e);
                }
            }

            match first_err {
                None => Ok(()),
                Some(e) => Err(e),
            }
        } else {
            self.copy_file(src, dest, &metadata)
        }
    }

    /// 삭제
    ///
    /// 자식을 먼저 재귀 삭제한 뒤 빈 디렉토리를 제거한다. 파일은 바로
    /// unlink. 존재하지 않는 경로는 부작용 없이 실패를 반환한다.
    fn delete_tree(&self, src: &Path) -> Result<()> {
        let metadata = self.filesystem.stat(src)?;

        if metadata.is_dir() {
            let mut first_err = None;
            for name in self.filesystem.list_child_names(src)? {
                let result = self.delete_tree(&src.join(&name));
                if let Err(e) = result {
                    first_err.get_or_insert(e);
                }
            }

            match first_err {
                None => self.filesystem.remove_empty_directory(src),
                Some(e) => Err(e),
            }
        } else {
            self.filesystem.remove_file(src)
        }
    }

    /// 정규화 기준 동일 경로 여부
    fn is_same_path(&self, src: &Path, dest: &Path) -> bool {
        if src == dest {
            return true;
        }
        match (
            self.filesystem.canonicalize(src),
            self.filesystem.canonicalize(dest),
        ) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// 파일을 블록 단위로 복사
    ///
    /// 소스를 읽기 전용으로, 대상을 소스의 모드 비트로 생성해 쓴다.
    /// 쓰기 실패는 그대로 전파하며, 대상은 잘린 상태로 남을 수 있다.
    fn copy_file(&self, src: &Path, dest: &Path, metadata: &Metadata) -> Result<()> {
        let mut input = self.filesystem.open_for_read(src)?;
        let mut output = self
            .filesystem
            .open_for_create(dest, Self::mode_bits(metadata))?;

        let mut buf = [0u8; COPY_BUF_SIZE];
        loop {
            let read = input.read(&mut buf).map_err(|e| DuoDirError::CopyFailed {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                reason: e.to_string(),
            })?;

            if read == 0 {
                break;
            }

            output
                .write_all(&buf[..read])
                .map_err(|e| DuoDirError::CopyFailed {
                    src: src.to_path_buf(),
                    dest: dest.to_path_buf(),
                    reason: e.to_string(),
                })?;
        }

        Ok(())
    }

    /// 소스 파일의 권한 모드 비트
    fn mode_bits(metadata: &Metadata) -> u32 {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            metadata.permissions().mode() & 0o7777
        }

        #[cfg(not(unix))]
        {
            let _ = metadata;
            0o644
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn engine_fixture() -> (FileSystem, TempDir) {
        (FileSystem::new(), TempDir::new().unwrap())
    }

    fn build_sample_tree(base: &Path) -> PathBuf {
        let root = base.join("a");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("x.txt"), "hi").unwrap();
        fs::write(root.join("sub").join("y.txt"), "bye").unwrap();
        root
    }

    #[test]
    fn test_copy_tree_copies_all_descendants() {
        let (filesystem, temp) = engine_fixture();
        let engine = TreeEngine::new(&filesystem);
        let src = build_sample_tree(temp.path());
        let dest = temp.path().join("b");

        engine
            .process_tree(&Operation::Copy {
                source: src.clone(),
                dest: dest.clone(),
            })
            .unwrap();

        assert_eq!(fs::read_to_string(dest.join("x.txt")).unwrap(), "hi");
        assert_eq!(
            fs::read_to_string(dest.join("sub").join("y.txt")).unwrap(),
            "bye"
        );

        // 소스 트리는 그대로
        assert_eq!(fs::read_to_string(src.join("x.txt")).unwrap(), "hi");
        assert!(src.join("sub").join("y.txt").exists());
    }

    #[test]
    fn test_copy_missing_source_fails_without_side_effects() {
        let (filesystem, temp) = engine_fixture();
        let engine = TreeEngine::new(&filesystem);
        let dest = temp.path().join("out");

        let result = engine.process_tree(&Operation::Copy {
            source: temp.path().join("missing"),
            dest: dest.clone(),
        });

        assert!(matches!(result, Err(DuoDirError::PathNotFound { .. })));
        assert!(!dest.exists());
    }

    #[test]
    fn test_copy_into_existing_dest_dir_fails() {
        let (filesystem, temp) = engine_fixture();
        let engine = TreeEngine::new(&filesystem);
        let src = build_sample_tree(temp.path());
        let dest = temp.path().join("b");
        fs::create_dir(&dest).unwrap();

        let result = engine.process_tree(&Operation::Copy {
            source: src,
            dest: dest.clone(),
        });

        // mkdir 실패는 하위로 진행하지 않고 그 가지를 중단한다
        assert!(matches!(result, Err(DuoDirError::FileExists { .. })));
        assert!(!dest.join("x.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_preserves_mode_bits() {
        use std::os::unix::fs::PermissionsExt;

        let (filesystem, temp) = engine_fixture();
        let engine = TreeEngine::new(&filesystem);
        let src = temp.path().join("tool.sh");
        let dest = temp.path().join("tool_copy.sh");
        fs::write(&src, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o755)).unwrap();

        engine
            .process_tree(&Operation::Copy {
                source: src,
                dest: dest.clone(),
            })
            .unwrap();

        let mode = fs::metadata(&dest).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755);
    }

    #[test]
    fn test_move_to_same_path_is_noop() {
        let (filesystem, temp) = engine_fixture();
        let engine = TreeEngine::new(&filesystem);
        let file = temp.path().join("keep.txt");
        fs::write(&file, "stay").unwrap();

        engine
            .process_tree(&Operation::Move {
                source: file.clone(),
                dest: file.clone(),
            })
            .unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "stay");
    }

    #[test]
    fn test_move_file() {
        let (filesystem, temp) = engine_fixture();
        let engine = TreeEngine::new(&filesystem);
        let src = temp.path().join("from.txt");
        let dest = temp.path().join("to.txt");
        fs::write(&src, "payload").unwrap();

        engine
            .process_tree(&Operation::Move {
                source: src.clone(),
                dest: dest.clone(),
            })
            .unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "payload");
    }

    #[test]
    fn test_move_directory_tree() {
        let (filesystem, temp) = engine_fixture();
        let engine = TreeEngine::new(&filesystem);
        let src = build_sample_tree(temp.path());
        let dest = temp.path().join("moved");

        engine
            .process_tree(&Operation::Move {
                source: src.clone(),
                dest: dest.clone(),
            })
            .unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(dest.join("x.txt")).unwrap(), "hi");
        assert_eq!(
            fs::read_to_string(dest.join("sub").join("y.txt")).unwrap(),
            "bye"
        );
    }

    #[test]
    fn test_move_missing_source_fails() {
        let (filesystem, temp) = engine_fixture();
        let engine = TreeEngine::new(&filesystem);

        let result = engine.process_tree(&Operation::Move {
            source: temp.path().join("ghost"),
            dest: temp.path().join("anywhere"),
        });

        assert!(matches!(result, Err(DuoDirError::PathNotFound { .. })));
    }

    #[test]
    fn test_delete_tree_removes_everything() {
        let (filesystem, temp) = engine_fixture();
        let engine = TreeEngine::new(&filesystem);
        let root = build_sample_tree(temp.path());

        engine
            .process_tree(&Operation::Delete {
                source: root.clone(),
            })
            .unwrap();

        assert!(!root.exists());
    }

    #[test]
    fn test_delete_single_file() {
        let (filesystem, temp) = engine_fixture();
        let engine = TreeEngine::new(&filesystem);
        let file = temp.path().join("gone.txt");
        fs::write(&file, "x").unwrap();

        engine
            .process_tree(&Operation::Delete {
                source: file.clone(),
            })
            .unwrap();

        assert!(!file.exists());
    }

    #[test]
    fn test_delete_nonexistent_fails_without_side_effects() {
        let (filesystem, temp) = engine_fixture();
        let engine = TreeEngine::new(&filesystem);
        let sibling = temp.path().join("untouched.txt");
        fs::write(&sibling, "safe").unwrap();

        let result = engine.process_tree(&Operation::Delete {
            source: temp.path().join("ghost"),
        });

        assert!(matches!(result, Err(DuoDirError::PathNotFound { .. })));
        assert_eq!(fs::read_to_string(&sibling).unwrap(), "safe");
    }

    #[test]
    fn test_copy_empty_directory() {
        let (filesystem, temp) = engine_fixture();
        let engine = TreeEngine::new(&filesystem);
        let src = temp.path().join("empty");
        let dest = temp.path().join("empty_copy");
        fs::create_dir(&src).unwrap();

        engine
            .process_tree(&Operation::Copy {
                source: src,
                dest: dest.clone(),
            })
            .unwrap();

        assert!(dest.is_dir());
        assert!(filesystem.list_child_names(&dest).unwrap().is_empty());
    }
}
