#![allow(dead_code)]
// Button bar component - 하단 액션 버튼 바
//
// 레이아웃이 계산한 사각형 위치에 버튼 라벨을 렌더링한다.
// 히트 테스트는 레이아웃 매니저가 담당하고 여기서는 그리기만 한다.

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// 버튼 바 컴포넌트
pub struct ButtonBar<'a> {
    /// 버튼 라벨 목록
    labels: &'a [&'a str],
    /// 레이아웃이 계산한 버튼 사각형 (labels와 같은 순서)
    rects: &'a [Rect],
    /// 바 배경색
    bar_bg_color: Color,
    /// 버튼 배경색
    button_bg_color: Color,
    /// 버튼 전경색
    button_fg_color: Color,
}

impl<'a> Default for ButtonBar<'a> {
    fn default() -> Self {
        Self {
            labels: &[],
            rects: &[],
            bar_bg_color: Color::Rgb(30, 30, 30),
            button_bg_color: Color::Rgb(45, 45, 48),
            button_fg_color: Color::Rgb(204, 204, 204),
        }
    }
}

impl<'a> ButtonBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 버튼 라벨 설정
    pub fn labels(mut self, labels: &'a [&'a str]) -> Self {
        self.labels = labels;
        self
    }

    /// 버튼 사각형 설정
    pub fn rects(mut self, rects: &'a [Rect]) -> Self {
        self.rects = rects;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bar_bg_color = theme.bg_primary.to_color();
        self.button_bg_color = theme.button_bg.to_color();
        self.button_fg_color = theme.button_fg.to_color();
        self
    }
}

impl Widget for ButtonBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bar_bg_color));

        let style = Style::default()
            .fg(self.button_fg_color)
            .bg(self.button_bg_color);

        for (label, rect) in self.labels.iter().zip(self.rects.iter()) {
            if rect.y != area.y || rect.x + rect.width > area.x + area.width {
                continue;
            }

            // 버튼 칸 채우고 라벨은 2칸 들여 쓰기
            for x in rect.x..rect.x + rect.width {
                if let Some(cell) = buf.cell_mut((x, rect.y)) {
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
            buf.set_string(rect.x + 2, rect.y, label, style);
        }
    }
}
