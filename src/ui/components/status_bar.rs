#![allow(dead_code)]
// Status bar component - 상태바 컴포넌트
//
// 활성 패널의 파일/디렉토리 개수와 총 크기, 토스트 메시지 표시

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// 상태바 컴포넌트
pub struct StatusBar<'a> {
    /// 파일 개수
    file_count: usize,
    /// 디렉토리 개수
    dir_count: usize,
    /// 총 크기 (포맷된 문자열)
    total_size: &'a str,
    /// 활성 패널 경로
    path: &'a str,
    /// 토스트 메시지 (있으면 좌측 정보 대신 표시)
    toast: Option<&'a str>,
    /// 배경색
    bg_color: Color,
    /// 전경색
    fg_color: Color,
    /// 토스트 색상
    toast_color: Color,
}

impl<'a> Default for StatusBar<'a> {
    fn default() -> Self {
        Self {
            file_count: 0,
            dir_count: 0,
            total_size: "0 B",
            path: "",
            toast: None,
            bg_color: Color::Rgb(0, 122, 204),
            fg_color: Color::White,
            toast_color: Color::Rgb(255, 215, 0),
        }
    }
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 파일 개수 설정
    pub fn file_count(mut self, count: usize) -> Self {
        self.file_count = count;
        self
    }

    /// 디렉토리 개수 설정
    pub fn dir_count(mut self, count: usize) -> Self {
        self.dir_count = count;
        self
    }

    /// 총 크기 설정
    pub fn total_size(mut self, size: &'a str) -> Self {
        self.total_size = size;
        self
    }

    /// 활성 패널 경로 설정
    pub fn path(mut self, path: &'a str) -> Self {
        self.path = path;
        self
    }

    /// 토스트 메시지 설정
    pub fn toast(mut self, toast: Option<&'a str>) -> Self {
        self.toast = toast;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg.to_color();
        self.fg_color = theme.status_bar_fg.to_color();
        self.toast_color = theme.warning.to_color();
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // 배경 채우기
        buf.set_style(area, Style::default().bg(self.bg_color));

        // 왼쪽 정보: 토스트가 있으면 토스트, 없으면 개수/크기
        let (left_info, left_color) = match self.toast {
            Some(message) => (format!(" {}", message), self.toast_color),
            None => (
                format!(
                    " {} files, {} dirs | {}",
                    self.file_count, self.dir_count, self.total_size
                ),
                self.fg_color,
            ),
        };

        // 오른쪽 정보: 활성 패널 경로
        let right_info = format!("{} ", self.path);

        let padding_len = area
            .width
            .saturating_sub(left_info.len() as u16 + right_info.len() as u16)
            as usize;
        let padding = " ".repeat(padding_len);

        let spans = vec![
            Span::styled(left_info, Style::default().fg(left_color)),
            Span::raw(padding),
            Span::styled(right_info, Style::default().fg(self.fg_color)),
        ];

        let paragraph = Paragraph::new(Line::from(spans));
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bar_creation() {
        let status_bar = StatusBar::new()
            .file_count(10)
            .dir_count(5)
            .total_size("1.2 GB")
            .path("/tmp");

        assert_eq!(status_bar.file_count, 10);
        assert_eq!(status_bar.dir_count, 5);
        assert_eq!(status_bar.total_size, "1.2 GB");
        assert_eq!(status_bar.path, "/tmp");
    }

    #[test]
    fn test_toast_overrides_counts() {
        let status_bar = StatusBar::new().toast(Some("Copy failed"));
        assert_eq!(status_bar.toast, Some("Copy failed"));
    }
}
