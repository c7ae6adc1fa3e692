#![allow(dead_code)]
// Layout system - 반응형 레이아웃
//
// 터미널 크기에 따른 모드:
// - 40x10 이상: 듀얼 패널 모드
// - 그 미만: 경고 메시지 표시

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthStr;

/// 최소 터미널 크기 상수
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 10;

/// 버튼 가로 패딩 (라벨 양옆 2칸씩)
const BUTTON_H_PADDING: u16 = 4;
/// 버튼 사이 간격
const BUTTON_GAP: u16 = 2;

/// 레이아웃 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// 듀얼 패널 모드
    DualPanel,
    /// 경고 모드 (터미널이 너무 작음)
    TooSmall,
}

/// 활성 패널
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePanel {
    #[default]
    Left,
    Right,
}

impl ActivePanel {
    /// 패널 전환
    pub fn toggle(&mut self) {
        *self = match self {
            ActivePanel::Left => ActivePanel::Right,
            ActivePanel::Right => ActivePanel::Left,
        };
    }
}

/// 레이아웃 영역
#[derive(Debug, Clone, Default)]
pub struct LayoutAreas {
    /// 좌측 패널 영역
    pub left_panel: Rect,
    /// 우측 패널 영역
    pub right_panel: Rect,
    /// 상태바 영역
    pub status_bar: Rect,
    /// 하단 버튼 바 영역
    pub button_bar: Rect,
    /// 경고 메시지 영역 (TooSmall 모드에서 사용)
    pub warning: Rect,
}

/// 레이아웃 매니저
///
/// 터미널 크기에서 패널/상태바/버튼 바 영역과 버튼 사각형을 계산하고,
/// 마우스 디스패치용 히트 테스트를 제공한다.
#[derive(Debug)]
pub struct LayoutManager {
    mode: LayoutMode,
    active_panel: ActivePanel,
    terminal_size: (u16, u16),
    areas: LayoutAreas,
    button_rects: Vec<Rect>,
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutManager {
    pub fn new() -> Self {
        Self {
            mode: LayoutMode::DualPanel,
            active_panel: ActivePanel::default(),
            terminal_size: (80, 24),
            areas: LayoutAreas::default(),
            button_rects: Vec::new(),
        }
    }

    /// 터미널 크기에 따라 레이아웃 모드 결정
    fn determine_mode(width: u16, height: u16) -> LayoutMode {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            LayoutMode::TooSmall
        } else {
            LayoutMode::DualPanel
        }
    }

    /// 터미널 크기 갱신 및 전체 레이아웃 재계산
    ///
    /// 리사이즈마다 호출된다. 버튼 사각형도 함께 다시 계산한다.
    pub fn update(&mut self, area: Rect, button_labels: &[&str]) {
        self.terminal_size = (area.width, area.height);
        self.mode = Self::determine_mode(area.width, area.height);
        self.areas = self.calculate_areas(area);
        self.button_rects = Self::calculate_button_rects(self.areas.button_bar, button_labels);
    }

    /// 레이아웃 영역 계산
    fn calculate_areas(&self, area: Rect) -> LayoutAreas {
        if self.mode == LayoutMode::TooSmall {
            return LayoutAreas {
                warning: area,
                ..Default::default()
            };
        }

        // 수직: 패널 | 상태바 | 버튼 바
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // 패널 영역
                Constraint::Length(1), // 상태바
                Constraint::Length(1), // 버튼 바
            ])
            .split(area);

        // 패널 영역을 좌우로 분할
        let panel_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(vertical_chunks[0]);

        LayoutAreas {
            left_panel: panel_chunks[0],
            right_panel: panel_chunks[1],
            status_bar: vertical_chunks[1],
            button_bar: vertical_chunks[2],
            warning: Rect::default(),
        }
    }

    /// 버튼 사각형 계산 (라벨 너비 + 패딩, 좌측부터 배치)
    fn calculate_button_rects(bar: Rect, labels: &[&str]) -> Vec<Rect> {
        let mut rects = Vec::with_capacity(labels.len());
        let mut x = bar.x + 2;

        for label in labels {
            let width = label.width() as u16 + BUTTON_H_PADDING;
            rects.push(Rect {
                x,
                y: bar.y,
                width,
                height: 1,
            });
            x += width + BUTTON_GAP;
        }

        rects
    }

    /// 현재 레이아웃 모드 반환
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// 레이아웃 영역 반환
    pub fn areas(&self) -> &LayoutAreas {
        &self.areas
    }

    /// 버튼 사각형 목록 반환
    pub fn button_rects(&self) -> &[Rect] {
        &self.button_rects
    }

    /// 활성 패널 반환
    pub fn active_panel(&self) -> ActivePanel {
        self.active_panel
    }

    /// 패널 전환
    pub fn toggle_panel(&mut self) {
        self.active_panel.toggle();
    }

    /// 활성 패널 설정
    pub fn set_active_panel(&mut self, panel: ActivePanel) {
        self.active_panel = panel;
    }

    /// 터미널 크기 반환
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// 터미널이 너무 작은지 확인
    pub fn is_too_small(&self) -> bool {
        self.mode == LayoutMode::TooSmall
    }

    /// 가로 위치가 가리키는 패널
    pub fn panel_at(&self, column: u16) -> ActivePanel {
        if column < self.areas.right_panel.x {
            ActivePanel::Left
        } else {
            ActivePanel::Right
        }
    }

    /// 좌표가 가리키는 버튼 인덱스
    pub fn button_at(&self, column: u16, row: u16) -> Option<usize> {
        self.button_rects.iter().position(|rect| {
            row == rect.y && column >= rect.x && column < rect.x + rect.width
        })
    }

    /// 특정 패널의 영역 반환
    pub fn panel_area(&self, panel: ActivePanel) -> Rect {
        match panel {
            ActivePanel::Left => self.areas.left_panel,
            ActivePanel::Right => self.areas.right_panel,
        }
    }
}
