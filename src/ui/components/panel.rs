#![allow(dead_code)]
// Panel component - 파일 패널 컴포넌트
//
// 파일 리스트 표시, 커서 상태, 테두리 렌더링

use crate::models::dir_entry::DirEntry;
use crate::ui::classify::{FileCategory, FileClassifier};
use crate::ui::Theme;
use crate::utils::formatter::{format_date, format_file_size};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 패널 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelStatus {
    #[default]
    Inactive,
    Active,
}

/// 크기/날짜 열을 표시할 최소 내부 너비
const DETAIL_MIN_WIDTH: u16 = 46;

/// 패널 컴포넌트
pub struct Panel<'a> {
    /// 패널 제목 (경로)
    title: &'a str,
    /// 패널 상태
    status: PanelStatus,
    /// 파일 목록
    entries: &'a [DirEntry],
    /// 커서 위치
    selected_index: usize,
    /// 스크롤 오프셋
    scroll_offset: usize,
    /// 분류기 (행 색상용)
    classifier: &'a FileClassifier,
    /// 활성 테두리 색상
    active_border_color: Color,
    /// 비활성 테두리 색상
    inactive_border_color: Color,
    /// 패널 배경색
    bg_color: Color,
    /// 파일 일반 색상
    file_normal_color: Color,
    /// 커서 색상
    file_selected_color: Color,
    /// 커서 배경색
    file_selected_bg_color: Color,
    /// 디렉토리 색상
    directory_color: Color,
    /// 실행 파일 색상
    executable_color: Color,
    /// 텍스트 파일 색상
    text_color: Color,
    /// 아카이브 색상
    archive_color: Color,
    /// 미디어 색상
    media_color: Color,
}

static DEFAULT_CLASSIFIER: FileClassifier = FileClassifier;

impl<'a> Default for Panel<'a> {
    fn default() -> Self {
        Self {
            title: "",
            status: PanelStatus::default(),
            entries: &[],
            selected_index: 0,
            scroll_offset: 0,
            classifier: &DEFAULT_CLASSIFIER,
            active_border_color: Color::Rgb(0, 120, 212),
            inactive_border_color: Color::Rgb(60, 60, 60),
            bg_color: Color::Rgb(30, 30, 30),
            file_normal_color: Color::Rgb(212, 212, 212),
            file_selected_color: Color::Rgb(255, 255, 255),
            file_selected_bg_color: Color::Rgb(0, 120, 212),
            directory_color: Color::Rgb(86, 156, 214),
            executable_color: Color::Rgb(78, 201, 176),
            text_color: Color::Rgb(220, 220, 170),
            archive_color: Color::Rgb(197, 134, 192),
            media_color: Color::Rgb(206, 145, 120),
        }
    }
}

impl<'a> Panel<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 제목 설정
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// 패널 상태 설정
    pub fn status(mut self, status: PanelStatus) -> Self {
        self.status = status;
        self
    }

    /// 파일 목록 설정
    pub fn entries(mut self, entries: &'a [DirEntry]) -> Self {
        self.entries = entries;
        self
    }

    /// 커서 인덱스 설정
    pub fn selected_index(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    /// 스크롤 오프셋 설정
    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// 분류기 설정
    pub fn classifier(mut self, classifier: &'a FileClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.active_border_color = theme.panel_active_border.to_color();
        self.inactive_border_color = theme.panel_inactive_border.to_color();
        self.bg_color = theme.panel_bg.to_color();
        self.file_normal_color = theme.file_normal.to_color();
        self.file_selected_color = theme.file_selected.to_color();
        self.file_selected_bg_color = theme.file_selected_bg.to_color();
        self.directory_color = theme.directory.to_color();
        self.executable_color = theme.executable.to_color();
        self.text_color = theme.text_file.to_color();
        self.archive_color = theme.archive.to_color();
        self.media_color = theme.media.to_color();
        self
    }

    /// 카테고리별 행 색상
    fn category_color(&self, category: FileCategory) -> Color {
        match category {
            FileCategory::Directory => self.directory_color,
            FileCategory::Executable => self.executable_color,
            FileCategory::Text => self.text_color,
            FileCategory::Archive => self.archive_color,
            FileCategory::Media => self.media_color,
            FileCategory::Other => self.file_normal_color,
        }
    }

    /// 표시 너비 기준으로 문자열 자르기
    fn truncate_to_width(text: &str, max_width: usize) -> String {
        let mut result = String::new();
        let mut width = 0usize;

        for ch in text.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if width + ch_width > max_width {
                break;
            }
            result.push(ch);
            width += ch_width;
        }

        result
    }
}

impl Widget for Panel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            return;
        }

        let border_color = match self.status {
            PanelStatus::Active => self.active_border_color,
            PanelStatus::Inactive => self.inactive_border_color,
        };

        let title = Self::truncate_to_width(self.title, area.width.saturating_sub(4) as usize);
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(self.bg_color));

        let inner = block.inner(area);
        block.render(area, buf);

        let visible = inner.height as usize;
        let show_details = inner.width >= DETAIL_MIN_WIDTH;

        for row in 0..visible {
            let index = self.scroll_offset + row;
            let Some(entry) = self.entries.get(index) else {
                break;
            };

            let is_selected = index == self.selected_index && self.status == PanelStatus::Active;

            let style = if is_selected {
                Style::default()
                    .fg(self.file_selected_color)
                    .bg(self.file_selected_bg_color)
            } else {
                Style::default()
                    .fg(self.category_color(self.classifier.classify(entry)))
                    .bg(self.bg_color)
            };

            let y = inner.y + row as u16;
            let total_width = inner.width as usize;

            // 상세 열: "크기 9칸 + 공백 + 날짜 16칸" (의사 엔트리는 공백)
            let detail = if show_details && !entry.is_pseudo() {
                let size = if entry.is_directory() {
                    "<DIR>".to_string()
                } else {
                    format_file_size(entry.size)
                };
                format!("{:>9} {}", size, format_date(entry.modified))
            } else {
                String::new()
            };

            let name_width = total_width.saturating_sub(detail.width() + 1);
            let name = Self::truncate_to_width(&entry.name, name_width);

            let padding = total_width
                .saturating_sub(name.width())
                .saturating_sub(detail.width());
            let line = format!("{}{}{}", name, " ".repeat(padding), detail);

            buf.set_string(inner.x, y, line, style);
        }
    }
}
