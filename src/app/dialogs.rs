//! 다이얼로그 컨트롤러
//!
//! 확인/입력 세션의 블로킹 루프. 세션이 열리면 바깥 입력 루프를
//! 대신해 이벤트를 동기적으로 소비하고, 종결(수락/거부)되는 순간
//! 제어를 돌려준다. 진입 시 바꾼 주변 터미널 모드는 에러 전파를
//! 포함한 모든 종료 경로에서 복원된다.

use crate::app::App;
use crate::core::actions::button_labels;
use crate::system::terminal::{AmbientModes, EventSource, ModeSnapshot};
use crate::ui::components::{ConfirmState, DialogStep, InputState};
use crate::ui::render;
use crate::utils::error::Result;
use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::backend::Backend;
use ratatui::Terminal;

/// 확인 다이얼로그 실행
///
/// 수락이면 true, 거부/Escape면 false.
pub fn run_confirm<B: Backend, E: EventSource, M: AmbientModes>(
    terminal: &mut Terminal<B>,
    events: &mut E,
    modes: &mut M,
    app: &mut App,
    mut state: ConfirmState,
) -> Result<bool> {
    let snapshot = ModeSnapshot::capture(modes);
    modes.set_mouse_capture(true)?;

    let outcome = confirm_loop(terminal, events, app, &mut state);

    snapshot.restore(modes)?;
    outcome
}

fn confirm_loop<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    events: &mut E,
    app: &mut App,
    state: &mut ConfirmState,
) -> Result<bool> {
    loop {
        terminal.draw(|f| {
            let size = f.area();
            app.layout.update(size, button_labels());
            app.sync_panel_viewports();
            state.resize(size);
            render::draw_confirm_overlay(f, app, state);
        })?;

        let step = match events.next_event()? {
            Event::Key(key) => state.handle_key(key.code),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Up(MouseButton::Left) => {
                state.handle_mouse(mouse.column, mouse.row)
            }
            // 리사이즈는 다음 draw에서 지오메트리를 다시 계산한다.
            // 포커스와 큐에 남은 키 입력은 그대로 유지된다.
            Event::Resize(_, _) => DialogStep::Pending,
            _ => DialogStep::Pending,
        };

        match step {
            DialogStep::Pending => {}
            DialogStep::Accept => return Ok(true),
            DialogStep::Reject => return Ok(false),
        }
    }
}

/// 입력 다이얼로그 실행
///
/// 수락이면 버퍼 내용을 Some으로, 거부/Escape면 None.
/// 빈 버퍼로는 수락으로 종결되지 않는다.
pub fn run_input<B: Backend, E: EventSource, M: AmbientModes>(
    terminal: &mut Terminal<B>,
    events: &mut E,
    modes: &mut M,
    app: &mut App,
    mut state: InputState,
) -> Result<Option<String>> {
    let snapshot = ModeSnapshot::capture(modes);
    modes.set_cursor_visible(true)?;
    modes.set_mouse_capture(true)?;

    let outcome = input_loop(terminal, events, app, &mut state);

    snapshot.restore(modes)?;
    outcome.map(|accepted| accepted.then(|| state.value))
}

fn input_loop<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    events: &mut E,
    app: &mut App,
    state: &mut InputState,
) -> Result<bool> {
    loop {
        terminal.draw(|f| {
            let size = f.area();
            app.layout.update(size, button_labels());
            app.sync_panel_viewports();
            state.resize(size);
            render::draw_input_overlay(f, app, state);
        })?;

        let step = match events.next_event()? {
            Event::Key(key) => state.handle_key(key.code),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Up(MouseButton::Left) => {
                state.handle_mouse(mouse.column, mouse.row)
            }
            // 리사이즈 중에도 버퍼와 포커스는 유지된다
            Event::Resize(_, _) => DialogStep::Pending,
            _ => DialogStep::Pending,
        };

        match step {
            DialogStep::Pending => {}
            DialogStep::Accept => return Ok(true),
            DialogStep::Reject => return Ok(false),
        }
    }
}
