#![allow(dead_code)]

use crate::models::dir_entry::DirEntry;
use crate::system::filesystem::FileSystem;
use crate::utils::error::{DuoDirError, Result};
use std::path::PathBuf;

/// 패널 상태
///
/// 한쪽 패널이 소유하는 디렉토리 목록, 커서, 스크롤 상태.
///
/// 불변식:
/// - `count > 0` 이면 `0 <= selected_index < count`
/// - `scroll_offset <= selected_index < scroll_offset + visible`
/// - `scroll_offset <= max(0, count - visible)`
#[derive(Debug, Clone)]
pub struct PanelState {
    /// 현재 경로
    pub current_path: PathBuf,
    /// 파일 목록 (`.`/`..` 의사 엔트리 포함, 이름순 정렬)
    pub entries: Vec<DirEntry>,
    /// 선택된 항목 인덱스
    pub selected_index: usize,
    /// 스크롤 오프셋
    pub scroll_offset: usize,
    /// 뷰포트 너비 (테두리 포함)
    pub viewport_width: u16,
    /// 뷰포트 높이 (테두리 포함)
    pub viewport_height: u16,
}

impl PanelState {
    /// 새 패널 상태 생성 (빈 목록)
    pub fn new(path: PathBuf) -> Self {
        Self {
            current_path: path,
            entries: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
            viewport_width: 0,
            viewport_height: 0,
        }
    }

    /// 뷰포트 크기 갱신 (리사이즈 시 레이아웃이 호출)
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// 테두리를 제외한 가시 행 수
    pub fn visible_rows(&self) -> usize {
        self.viewport_height.saturating_sub(2) as usize
    }

    /// 파일 목록 새로고침
    ///
    /// 현재 경로의 목록을 통째로 다시 읽어 교체한다. 읽기에 실패하면
    /// 패널은 빈 상태가 되고 에러를 반환한다. 부분 채움은 없다.
    /// 성공 시 커서는 `..` 엔트리를 기본 선택한다.
    pub fn reload(&mut self, filesystem: &FileSystem) -> Result<()> {
        let listing = match filesystem.read_directory(&self.current_path) {
            Ok(listing) => listing,
            Err(e) => {
                self.entries = Vec::new();
                self.selected_index = 0;
                self.scroll_offset = 0;
                return Err(e);
            }
        };

        let mut entries = vec![DirEntry::pseudo("."), DirEntry::pseudo("..")];
        entries.extend(listing);
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        // 이전 목록은 통째로 버리고 교체
        self.entries = entries;
        self.scroll_offset = 0;
        self.selected_index = self
            .entries
            .iter()
            .position(|e| e.name == "..")
            .unwrap_or(0);

        Ok(())
    }

    /// 커서 이동
    ///
    /// 빈 패널에서는 아무 것도 하지 않는다. 뷰포트 높이가 2 이하인
    /// 퇴화 상태에서는 커서와 스크롤을 0으로 고정한다. 그 외에는
    /// 커서를 범위 안으로 클램프한 뒤 커서가 보이도록 스크롤을
    /// 최소한으로 조정한다.
    pub fn move_selection(&mut self, delta: isize) {
        let count = self.entries.len();
        if count == 0 {
            return;
        }

        if self.viewport_height <= 2 {
            self.selected_index = 0;
            self.scroll_offset = 0;
            return;
        }

        let visible = self.visible_rows();

        let selected = self.selected_index as isize + delta;
        let selected = selected.clamp(0, count as isize - 1) as usize;
        self.selected_index = selected;

        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        }
        if selected >= self.scroll_offset + visible {
            self.scroll_offset = selected + 1 - visible;
        }

        let max_scroll = count.saturating_sub(visible);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }
    }

    /// 선택된 디렉토리로 진입
    ///
    /// 선택 엔트리가 디렉토리일 때만 유효하다. `..`과 하위 이름을
    /// 정규화된 절대 경로로 해석하고, 해석 실패(깨진 링크, 권한 등)
    /// 시 현재 경로를 바꾸지 않고 에러를 반환한다. 성공하면 경로를
    /// 교체하고 새로고침한다.
    pub fn enter_directory(&mut self, filesystem: &FileSystem) -> Result<()> {
        let entry = self
            .selected_entry()
            .ok_or_else(|| DuoDirError::PathNotFound {
                path: self.current_path.clone(),
            })?;

        if !entry.is_directory() {
            return Err(DuoDirError::NotADirectory {
                path: self.current_path.join(&entry.name),
            });
        }

        let candidate = self.current_path.join(&entry.name);
        let resolved = filesystem.canonicalize(&candidate)?;

        self.current_path = resolved;
        self.reload(filesystem)
    }

    /// 선택된 항목 반환
    pub fn selected_entry(&self) -> Option<&DirEntry> {
        self.entries.get(self.selected_index)
    }

    /// 파일 개수 반환 (의사 엔트리 제외)
    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_file()).count()
    }

    /// 디렉토리 개수 반환 (의사 엔트리 제외)
    pub fn dir_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.is_directory() && !e.is_pseudo())
            .count()
    }

    /// 전체 크기 반환 (바이트)
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}
