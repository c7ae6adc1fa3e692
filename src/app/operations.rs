//! 파일 작업 흐름
//!
//! 버튼/핫키 액션 하나가 다이얼로그 세션을 열고, 종결 결과에 따라
//! 트리 엔진을 호출한 뒤 영향을 받은 패널을 새로고침한다. 작업 결과는
//! 토스트로 보고하고 UI는 계속 응답한다.

use crate::app::dialogs;
use crate::app::App;
use crate::models::{DirEntry, Operation};
use crate::system::terminal::{AmbientModes, EventSource};
use crate::system::TreeEngine;
use crate::ui::components::{ConfirmState, InputState};
use crate::utils::error::{DuoDirError, Result};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 복사/이동 공통 구분
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransferKind {
    Copy,
    Move,
}

/// 활성 패널의 선택 엔트리 (의사 엔트리는 작업 대상이 아님)
fn selected_real_entry(app: &App) -> Option<DirEntry> {
    let entry = app.active_panel_state().selected_entry()?;
    if entry.is_pseudo() {
        return None;
    }
    Some(entry.clone())
}

/// 복사 액션
pub fn copy_action<B: Backend, E: EventSource, M: AmbientModes>(
    app: &mut App,
    terminal: &mut Terminal<B>,
    events: &mut E,
    modes: &mut M,
) -> Result<()> {
    transfer_action(app, terminal, events, modes, TransferKind::Copy)
}

/// 이동 액션
pub fn move_action<B: Backend, E: EventSource, M: AmbientModes>(
    app: &mut App,
    terminal: &mut Terminal<B>,
    events: &mut E,
    modes: &mut M,
) -> Result<()> {
    transfer_action(app, terminal, events, modes, TransferKind::Move)
}

/// 복사/이동 공통 흐름
///
/// 대상 경로는 비활성 패널 경로로 미리 채워 입력 다이얼로그로 받는다.
fn transfer_action<B: Backend, E: EventSource, M: AmbientModes>(
    app: &mut App,
    terminal: &mut Terminal<B>,
    events: &mut E,
    modes: &mut M,
    kind: TransferKind,
) -> Result<()> {
    let Some(entry) = selected_real_entry(app) else {
        return Ok(());
    };

    let source_dir = app.active_panel_state().current_path.clone();
    let initial = app
        .inactive_panel_state()
        .current_path
        .to_string_lossy()
        .to_string();

    let title = match kind {
        TransferKind::Copy => "Copy",
        TransferKind::Move => "Move",
    };
    let state = InputState::new(title, "Enter the destination path:", initial);

    let Some(dest_dir) = dialogs::run_input(terminal, events, modes, app, state)? else {
        return Ok(());
    };

    let source = source_dir.join(&entry.name);
    let dest = PathBuf::from(dest_dir).join(&entry.name);
    let operation = match kind {
        TransferKind::Copy => Operation::Copy { source, dest },
        TransferKind::Move => Operation::Move { source, dest },
    };

    let result = TreeEngine::new(&app.filesystem).process_tree(&operation);
    app.reload_panels();

    match result {
        Ok(()) => app.set_toast(&format!("{}: {}", operation.name(), entry.name)),
        Err(e) => app.set_toast(&format!("{} failed: {}", operation.name(), e)),
    }
    Ok(())
}

/// 삭제 액션
///
/// 확인 다이얼로그를 거쳐 서브트리 전체를 영구 삭제한다.
pub fn delete_action<B: Backend, E: EventSource, M: AmbientModes>(
    app: &mut App,
    terminal: &mut Terminal<B>,
    events: &mut E,
    modes: &mut M,
) -> Result<()> {
    let Some(entry) = selected_real_entry(app) else {
        return Ok(());
    };

    let path = app.active_panel_state().current_path.join(&entry.name);
    let title = if entry.is_directory() {
        "Delete directory"
    } else {
        "Delete file"
    };

    let state = ConfirmState::new(
        title,
        entry.name.clone(),
        Some(path.display().to_string()),
        "Delete",
        "Cancel",
    );

    if !dialogs::run_confirm(terminal, events, modes, app, state)? {
        return Ok(());
    }

    let result = TreeEngine::new(&app.filesystem).process_tree(&Operation::Delete {
        source: path,
    });
    app.reload_panels();

    match result {
        Ok(()) => app.set_toast(&format!("Deleted: {}", entry.name)),
        Err(e) => app.set_toast(&format!("Delete failed: {}", e)),
    }
    Ok(())
}

/// 새 디렉토리 생성 액션
pub fn mkdir_action<B: Backend, E: EventSource, M: AmbientModes>(
    app: &mut App,
    terminal: &mut Terminal<B>,
    events: &mut E,
    modes: &mut M,
) -> Result<()> {
    let parent = app.active_panel_state().current_path.clone();
    let state = InputState::new("Make directory", "Enter the directory name:", "");

    let Some(name) = dialogs::run_input(terminal, events, modes, app, state)? else {
        return Ok(());
    };

    let result = app.filesystem.create_directory(&parent.join(&name));
    app.reload_panels();

    match result {
        Ok(()) => app.set_toast(&format!("Created: {}", name)),
        Err(e) => app.set_toast(&format!("MkDir failed: {}", e)),
    }
    Ok(())
}

/// 선택 파일을 외부 에디터로 열기
///
/// TUI를 일시 중단하고 에디터를 실행한 뒤 복귀한다.
pub fn open_editor_action<B: Backend>(app: &mut App, terminal: &mut Terminal<B>) -> Result<()> {
    let Some(entry) = selected_real_entry(app) else {
        return Ok(());
    };
    if !entry.is_file() {
        return Ok(());
    }

    let path = app.active_panel_state().current_path.join(&entry.name);
    let editor = app.default_editor().to_string();

    if let Err(e) = run_editor(terminal, &editor, &path) {
        app.set_toast(&format!("{}", e));
    }
    app.reload_panels();
    Ok(())
}

/// 에디터 실행 (TUI 중단/복귀 포함)
fn run_editor<B: Backend>(
    terminal: &mut Terminal<B>,
    command_line: &str,
    path: &Path,
) -> Result<()> {
    let mut parts = shlex::split(command_line).unwrap_or_default();
    if parts.is_empty() {
        return Err(DuoDirError::EditorFailed {
            reason: format!("invalid editor command: {}", command_line),
        });
    }
    let program = parts.remove(0);

    // TUI 일시 중단
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    let status = Command::new(&program).args(&parts).arg(path).status();

    // TUI 복귀 (강제 재그리기)
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    terminal.clear()?;

    match status {
        Ok(s) if s.success() => Ok(()),
        Ok(s) => Err(DuoDirError::EditorFailed {
            reason: format!("{} exited with {}", program, s),
        }),
        Err(e) => Err(DuoDirError::EditorFailed {
            reason: e.to_string(),
        }),
    }
}
