#![allow(dead_code)]
//! 모달 다이얼로그
//!
//! 확인/입력 다이얼로그의 상태 머신과 지오메트리, 렌더링 위젯.
//! 상태 머신은 이벤트 하나당 `DialogStep`을 반환하고, 블로킹 루프는
//! `app::dialogs`가 담당한다.

use crate::ui::Theme;
use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 입력 버퍼 최대 길이 (문자 수)
pub const MAX_INPUT_LEN: usize = 4096;

/// 확인 다이얼로그 크기
const CONFIRM_WIDTH: u16 = 60;
const CONFIRM_HEIGHT: u16 = 10;
/// 입력 다이얼로그 크기
const INPUT_WIDTH: u16 = 70;
const INPUT_HEIGHT: u16 = 12;
/// 버튼 라벨 양옆 패딩 ("[ label ]")
const BUTTON_PADDING: u16 = 4;

/// 이벤트 하나를 처리한 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogStep {
    /// 세션 유지
    Pending,
    /// 수락으로 종결
    Accept,
    /// 거부로 종결
    Reject,
}

/// 다이얼로그 지오메트리
///
/// 리사이즈마다 다시 계산된다. 버튼 사각형은 마우스 히트 테스트에 쓰인다.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogGeometry {
    /// 다이얼로그 전체 영역 (화면 중앙)
    pub area: Rect,
    /// 수락 버튼
    pub accept_button: Rect,
    /// 거부 버튼
    pub reject_button: Rect,
    /// 입력 필드 (입력 다이얼로그만)
    pub input_field: Option<Rect>,
}

impl DialogGeometry {
    /// 화면 중앙에 고정 크기 영역 배치 (화면보다 크면 잘라냄)
    fn centered(screen: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(screen.width);
        let height = height.min(screen.height);
        Rect {
            x: screen.x + (screen.width.saturating_sub(width)) / 2,
            y: screen.y + (screen.height.saturating_sub(height)) / 2,
            width,
            height,
        }
    }

    /// 버튼 두 개를 가로 중앙에 배치
    fn button_pair(
        area: Rect,
        accept_label: &str,
        reject_label: &str,
        spacing: u16,
    ) -> (Rect, Rect) {
        let accept_width = accept_label.width() as u16 + BUTTON_PADDING;
        let reject_width = reject_label.width() as u16 + BUTTON_PADDING;
        let total = accept_width + reject_width + spacing;
        let start = area.x + (area.width.saturating_sub(total)) / 2;
        let y = area.y + area.height.saturating_sub(3);

        let accept = Rect {
            x: start,
            y,
            width: accept_width,
            height: 1,
        };
        let reject = Rect {
            x: start + accept_width + spacing,
            y,
            width: reject_width,
            height: 1,
        };
        (accept, reject)
    }

    /// 확인 다이얼로그 지오메트리 계산
    pub fn confirm(screen: Rect, accept_label: &str, reject_label: &str) -> Self {
        let area = Self::centered(screen, CONFIRM_WIDTH, CONFIRM_HEIGHT);
        let (accept_button, reject_button) = Self::button_pair(area, accept_label, reject_label, 6);
        Self {
            area,
            accept_button,
            reject_button,
            input_field: None,
        }
    }

    /// 입력 다이얼로그 지오메트리 계산
    pub fn input(screen: Rect, accept_label: &str, reject_label: &str) -> Self {
        let area = Self::centered(screen, INPUT_WIDTH, INPUT_HEIGHT);
        let (accept_button, reject_button) =
            Self::button_pair(area, accept_label, reject_label, 18);
        let input_field = Rect {
            x: area.x + 2,
            y: area.y + 5,
            width: area.width.saturating_sub(4),
            height: 1,
        };
        Self {
            area,
            accept_button,
            reject_button,
            input_field: Some(input_field),
        }
    }
}

/// 좌표가 버튼 사각형 안인지 확인 (높이 1 가정)
fn hit(rect: Rect, column: u16, row: u16) -> bool {
    row == rect.y && column >= rect.x && column < rect.x + rect.width
}

/// 확인 다이얼로그 포커스
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmFocus {
    Accept,
    Reject,
}

/// 확인 다이얼로그 세션 상태
#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub title: String,
    pub line1: String,
    pub line2: Option<String>,
    pub accept_label: String,
    pub reject_label: String,
    pub focus: ConfirmFocus,
    pub geometry: DialogGeometry,
}

impl ConfirmState {
    /// 새 확인 세션 생성 (기본 포커스는 수락 버튼)
    pub fn new(
        title: impl Into<String>,
        line1: impl Into<String>,
        line2: Option<String>,
        accept_label: impl Into<String>,
        reject_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            line1: line1.into(),
            line2,
            accept_label: accept_label.into(),
            reject_label: reject_label.into(),
            focus: ConfirmFocus::Accept,
            geometry: DialogGeometry::default(),
        }
    }

    /// 리사이즈: 지오메트리만 다시 계산, 포커스는 유지
    pub fn resize(&mut self, screen: Rect) {
        self.geometry = DialogGeometry::confirm(screen, &self.accept_label, &self.reject_label);
    }

    /// 키 이벤트 처리
    pub fn handle_key(&mut self, code: KeyCode) -> DialogStep {
        match code {
            KeyCode::Tab => {
                self.focus = match self.focus {
                    ConfirmFocus::Accept => ConfirmFocus::Reject,
                    ConfirmFocus::Reject => ConfirmFocus::Accept,
                };
                DialogStep::Pending
            }
            // Escape는 포커스와 무관하게 거부
            KeyCode::Esc => DialogStep::Reject,
            KeyCode::Enter => {
                if self.focus == ConfirmFocus::Accept {
                    DialogStep::Accept
                } else {
                    DialogStep::Reject
                }
            }
            _ => DialogStep::Pending,
        }
    }

    /// 마우스 릴리즈 처리: 버튼 히트 시 포커스 이동 + 즉시 Enter
    pub fn handle_mouse(&mut self, column: u16, row: u16) -> DialogStep {
        if hit(self.geometry.accept_button, column, row) {
            self.focus = ConfirmFocus::Accept;
            return DialogStep::Accept;
        }
        if hit(self.geometry.reject_button, column, row) {
            self.focus = ConfirmFocus::Reject;
            return DialogStep::Reject;
        }
        DialogStep::Pending
    }
}

/// 입력 다이얼로그 포커스
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFocus {
    Text,
    Accept,
    Reject,
}

/// 입력 다이얼로그 세션 상태
#[derive(Debug, Clone)]
pub struct InputState {
    pub title: String,
    pub prompt: String,
    pub value: String,
    pub max_len: usize,
    pub focus: InputFocus,
    pub geometry: DialogGeometry,
}

impl InputState {
    /// 새 입력 세션 생성 (기본 포커스는 텍스트 필드)
    pub fn new(
        title: impl Into<String>,
        prompt: impl Into<String>,
        initial: impl Into<String>,
    ) -> Self {
        let mut value: String = initial.into();
        if value.chars().count() > MAX_INPUT_LEN {
            value = value.chars().take(MAX_INPUT_LEN).collect();
        }
        Self {
            title: title.into(),
            prompt: prompt.into(),
            value,
            max_len: MAX_INPUT_LEN,
            focus: InputFocus::Text,
            geometry: DialogGeometry::default(),
        }
    }

    /// 리사이즈: 지오메트리만 다시 계산, 버퍼와 포커스는 유지
    pub fn resize(&mut self, screen: Rect) {
        self.geometry = DialogGeometry::input(screen, "OK", "Cancel");
    }

    /// 키 이벤트 처리
    pub fn handle_key(&mut self, code: KeyCode) -> DialogStep {
        match code {
            KeyCode::Tab => {
                self.focus = match self.focus {
                    InputFocus::Text => InputFocus::Accept,
                    InputFocus::Accept => InputFocus::Reject,
                    InputFocus::Reject => InputFocus::Text,
                };
                DialogStep::Pending
            }
            // Escape는 포커스/버퍼와 무관하게 거부
            KeyCode::Esc => DialogStep::Reject,
            KeyCode::Enter => match self.focus {
                // 빈 버퍼로는 수락되지 않는다 (세션 유지)
                InputFocus::Text | InputFocus::Accept => {
                    if self.value.is_empty() {
                        DialogStep::Pending
                    } else {
                        DialogStep::Accept
                    }
                }
                InputFocus::Reject => DialogStep::Reject,
            },
            KeyCode::Char(c) => {
                if self.focus == InputFocus::Text && self.value.chars().count() < self.max_len {
                    self.value.push(c);
                }
                DialogStep::Pending
            }
            KeyCode::Backspace => {
                if self.focus == InputFocus::Text {
                    self.value.pop();
                }
                DialogStep::Pending
            }
            _ => DialogStep::Pending,
        }
    }

    /// 마우스 릴리즈 처리: 버튼 히트 시 포커스 이동 + 해당 포커스의 Enter
    pub fn handle_mouse(&mut self, column: u16, row: u16) -> DialogStep {
        if hit(self.geometry.accept_button, column, row) {
            self.focus = InputFocus::Accept;
            return self.handle_key(KeyCode::Enter);
        }
        if hit(self.geometry.reject_button, column, row) {
            self.focus = InputFocus::Reject;
            return DialogStep::Reject;
        }
        DialogStep::Pending
    }
}

/// 렌더링할 세션 참조
#[derive(Clone, Copy)]
pub enum DialogKindRef<'a> {
    Confirm(&'a ConfirmState),
    Input(&'a InputState),
}

/// 다이얼로그 위젯
pub struct Dialog<'a> {
    kind: DialogKindRef<'a>,
    bg_color: Color,
    fg_color: Color,
    border_color: Color,
    title_color: Color,
    button_bg: Color,
    button_fg: Color,
    button_selected_bg: Color,
    button_selected_fg: Color,
    input_bg: Color,
}

impl<'a> Dialog<'a> {
    /// 확인 다이얼로그 위젯
    pub fn confirm(state: &'a ConfirmState) -> Self {
        Self::with_kind(DialogKindRef::Confirm(state))
    }

    /// 입력 다이얼로그 위젯
    pub fn input(state: &'a InputState) -> Self {
        Self::with_kind(DialogKindRef::Input(state))
    }

    fn with_kind(kind: DialogKindRef<'a>) -> Self {
        Self {
            kind,
            bg_color: Color::Rgb(45, 45, 48),
            fg_color: Color::Rgb(212, 212, 212),
            border_color: Color::Rgb(0, 120, 212),
            title_color: Color::Rgb(0, 120, 212),
            button_bg: Color::Rgb(60, 60, 60),
            button_fg: Color::Rgb(212, 212, 212),
            button_selected_bg: Color::Rgb(0, 120, 212),
            button_selected_fg: Color::White,
            input_bg: Color::Rgb(30, 30, 30),
        }
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.panel_bg.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.border_color = theme.panel_active_border.to_color();
        self.title_color = theme.accent.to_color();
        self.button_bg = theme.button_bg.to_color();
        self.button_fg = theme.button_fg.to_color();
        self.button_selected_bg = theme.file_selected_bg.to_color();
        self.button_selected_fg = theme.file_selected.to_color();
        self.input_bg = theme.bg_primary.to_color();
        self
    }

    /// 버튼 렌더링 헬퍼
    fn render_button(&self, buf: &mut Buffer, rect: Rect, label: &str, is_selected: bool) {
        let (bg, fg) = if is_selected {
            (self.button_selected_bg, self.button_selected_fg)
        } else {
            (self.button_bg, self.button_fg)
        };
        let style = Style::default().fg(fg).bg(bg);

        for x in rect.x..rect.x + rect.width {
            if let Some(cell) = buf.cell_mut((x, rect.y)) {
                cell.set_symbol(" ");
                cell.set_style(style);
            }
        }
        buf.set_string(rect.x + 2, rect.y, label, style);
    }

    /// 테두리와 제목 렌더링, 성공 시 true
    fn render_frame(&self, buf: &mut Buffer, area: Rect, title: &str) -> bool {
        if area.width < 10 || area.height < 5 {
            return false;
        }

        Clear.render(area, buf);
        let block = Block::default()
            .title(format!(" {} ", title))
            .title_style(
                Style::default()
                    .fg(self.title_color)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .style(Style::default().bg(self.bg_color));
        block.render(area, buf);
        true
    }

    fn render_confirm(&self, buf: &mut Buffer, state: &ConfirmState) {
        let area = state.geometry.area;
        if !self.render_frame(buf, area, &state.title) {
            return;
        }

        let text_style = Style::default().fg(self.fg_color);
        let max_width = area.width.saturating_sub(4) as usize;

        let line1: String = state.line1.chars().take(max_width).collect();
        buf.set_string(area.x + 2, area.y + 3, line1, text_style);

        if let Some(ref line2) = state.line2 {
            let line2: String = line2.chars().take(max_width).collect();
            buf.set_string(area.x + 2, area.y + 4, line2, text_style);
        }

        self.render_button(
            buf,
            state.geometry.accept_button,
            &state.accept_label,
            state.focus == ConfirmFocus::Accept,
        );
        self.render_button(
            buf,
            state.geometry.reject_button,
            &state.reject_label,
            state.focus == ConfirmFocus::Reject,
        );
    }

    fn render_input(&self, buf: &mut Buffer, state: &InputState) {
        let area = state.geometry.area;
        if !self.render_frame(buf, area, &state.title) {
            return;
        }

        let text_style = Style::default().fg(self.fg_color);
        let max_width = area.width.saturating_sub(4) as usize;

        let prompt: String = state.prompt.chars().take(max_width).collect();
        buf.set_string(area.x + 2, area.y + 3, prompt, text_style);

        // 입력 필드: "> " 프롬프트 + 값 (길면 끝부분만)
        if let Some(field) = state.geometry.input_field {
            let field_style = Style::default().fg(self.fg_color).bg(self.input_bg);
            for x in field.x..field.x + field.width {
                if let Some(cell) = buf.cell_mut((x, field.y)) {
                    cell.set_symbol(" ");
                    cell.set_style(field_style);
                }
            }

            let visible_width = field.width.saturating_sub(3) as usize;
            let char_count = state.value.chars().count();
            let tail: String = state
                .value
                .chars()
                .skip(char_count.saturating_sub(visible_width))
                .collect();

            buf.set_string(field.x, field.y, "> ", field_style);
            buf.set_string(field.x + 2, field.y, tail, field_style);
        }

        self.render_button(
            buf,
            state.geometry.accept_button,
            "OK",
            state.focus == InputFocus::Accept,
        );
        self.render_button(
            buf,
            state.geometry.reject_button,
            "Cancel",
            state.focus == InputFocus::Reject,
        );
    }
}

impl Widget for Dialog<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        match self.kind {
            DialogKindRef::Confirm(state) => self.render_confirm(buf, state),
            DialogKindRef::Input(state) => self.render_input(buf, state),
        }
    }
}
