//! 입력 디스패처
//!
//! 틱당 이벤트 하나를 받아 활성 패널 조작, 바인딩된 액션(다이얼로그
//! 세션 포함), 또는 종료 신호로 해석한다. 리사이즈는 다른 상태와
//! 무관하게 즉시 반영된다.

use crate::app::operations;
use crate::app::App;
use crate::core::actions::{button_labels, find_action, find_button_by_hotkey, Action, BUTTON_DEFS};
use crate::system::terminal::{AmbientModes, EventSource};
use crate::utils::error::Result;
use crossterm::event::{Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// 루프 계속 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// 이벤트 하나 처리
pub fn handle_event<B: Backend, E: EventSource, M: AmbientModes>(
    app: &mut App,
    terminal: &mut Terminal<B>,
    events: &mut E,
    modes: &mut M,
    event: Event,
) -> Result<Flow> {
    match event {
        // 리사이즈는 항상 즉시 반영 (다음 draw에서 강제 재그리기)
        Event::Resize(width, height) => {
            app.layout
                .update(Rect::new(0, 0, width, height), button_labels());
            app.sync_panel_viewports();
            Ok(Flow::Continue)
        }
        Event::Key(key) => handle_key(app, terminal, events, modes, key.modifiers, key.code),
        Event::Mouse(mouse) => handle_mouse(app, terminal, events, modes, mouse),
        _ => Ok(Flow::Continue),
    }
}

/// 키 입력 처리
fn handle_key<B: Backend, E: EventSource, M: AmbientModes>(
    app: &mut App,
    terminal: &mut Terminal<B>,
    events: &mut E,
    modes: &mut M,
    modifiers: KeyModifiers,
    code: KeyCode,
) -> Result<Flow> {
    // 1) 바인딩 테이블 조회 (전역 종료 키 포함)
    if let Some(action) = find_action(modifiers, code) {
        return run_action(app, terminal, events, modes, action);
    }

    // 2) 버튼 핫키 (대소문자 무시)
    if let KeyCode::Char(c) = code {
        if let Some(index) = find_button_by_hotkey(c) {
            return run_button(app, terminal, events, modes, index);
        }
    }

    Ok(Flow::Continue)
}

/// 버튼 실행: 액션이 없으면 종료 신호
fn run_button<B: Backend, E: EventSource, M: AmbientModes>(
    app: &mut App,
    terminal: &mut Terminal<B>,
    events: &mut E,
    modes: &mut M,
    index: usize,
) -> Result<Flow> {
    match BUTTON_DEFS[index].action {
        Some(action) => run_action(app, terminal, events, modes, action),
        None => Ok(Flow::Quit),
    }
}

/// 액션 실행
fn run_action<B: Backend, E: EventSource, M: AmbientModes>(
    app: &mut App,
    terminal: &mut Terminal<B>,
    events: &mut E,
    modes: &mut M,
    action: Action,
) -> Result<Flow> {
    match action {
        Action::Quit => return Ok(Flow::Quit),
        Action::TogglePanel => app.toggle_panel(),
        Action::MoveUp => app.move_selection_active(-1),
        Action::MoveDown => app.move_selection_active(1),
        // 디렉토리가 아니거나 해석 실패면 현재 상태 유지
        Action::EnterSelected => {
            let _ = app.enter_selected();
        }
        Action::Refresh => app.reload_panels(),
        Action::Copy => operations::copy_action(app, terminal, events, modes)?,
        Action::Move => operations::move_action(app, terminal, events, modes)?,
        Action::Delete => operations::delete_action(app, terminal, events, modes)?,
        Action::MakeDirectory => operations::mkdir_action(app, terminal, events, modes)?,
        Action::OpenEditor => operations::open_editor_action(app, terminal)?,
    }
    Ok(Flow::Continue)
}

/// 마우스 입력 처리
fn handle_mouse<B: Backend, E: EventSource, M: AmbientModes>(
    app: &mut App,
    terminal: &mut Terminal<B>,
    events: &mut E,
    modes: &mut M,
    mouse: MouseEvent,
) -> Result<Flow> {
    if app.layout.is_too_small() {
        return Ok(Flow::Continue);
    }

    let is_release = mouse.kind == MouseEventKind::Up(MouseButton::Left);

    // 1) 버튼 바 클릭
    if is_release {
        if let Some(index) = app.layout.button_at(mouse.column, mouse.row) {
            return run_button(app, terminal, events, modes, index);
        }
    }

    // 2) 가로 위치로 활성 패널 결정
    let which = app.layout.panel_at(mouse.column);
    app.layout.set_active_panel(which);

    // 3) 스크롤 제스처
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.move_selection_active(-1);
            return Ok(Flow::Continue);
        }
        MouseEventKind::ScrollDown => {
            app.move_selection_active(1);
            return Ok(Flow::Continue);
        }
        _ => {}
    }

    // 4) 패널 행 릴리즈: 선택, 같은 행 연속 릴리즈는 디렉토리 진입
    if is_release {
        let area = app.layout.panel_area(which);
        let Some(index) = row_index_at(app, which, area, mouse.column, mouse.row) else {
            return Ok(Flow::Continue);
        };

        let panel = app.panel_mut(which);
        panel.selected_index = index;
        panel.move_selection(0);

        if app.register_row_click(which, index) {
            let _ = app.enter_selected();
        }
    }

    Ok(Flow::Continue)
}

/// 마우스 좌표가 가리키는 엔트리 인덱스
fn row_index_at(
    app: &App,
    which: crate::ui::ActivePanel,
    area: Rect,
    column: u16,
    row: u16,
) -> Option<usize> {
    // 테두리 안쪽만 유효
    if area.width < 2 || area.height < 2 {
        return None;
    }
    if column <= area.x || column >= area.x + area.width - 1 {
        return None;
    }
    if row <= area.y || row >= area.y + area.height - 1 {
        return None;
    }

    let panel = app.panel(which);
    let index = panel.scroll_offset + (row - area.y - 1) as usize;
    if index < panel.entries.len() {
        Some(index)
    } else {
        None
    }
}
