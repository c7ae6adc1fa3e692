use super::*;
use crate::app::dialogs;
use crate::app::input::{self, Flow};
use crate::system::terminal::{AmbientModes, EventSource};
use crate::ui::components::{ConfirmState, InputState};
use crate::utils::error::{DuoDirError, Result as DuoResult};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::collections::VecDeque;
use tempfile::TempDir;

/// 스크립트된 이벤트 소스 (다이얼로그 세션 구동용)
struct ScriptedEvents {
    queue: VecDeque<Event>,
}

impl ScriptedEvents {
    fn new(events: Vec<Event>) -> Self {
        Self {
            queue: events.into(),
        }
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> DuoResult<Event> {
        self.queue
            .pop_front()
            .ok_or_else(|| DuoDirError::Config("event script exhausted".to_string()))
    }

    fn poll_event(&mut self, _timeout: Duration) -> DuoResult<Option<Event>> {
        Ok(self.queue.pop_front())
    }
}

/// 모드 기록 더블 (복원 검증용)
struct RecordingModes {
    cursor_visible: bool,
    mouse_capture: bool,
    cursor_was_visible: bool,
}

impl RecordingModes {
    fn new() -> Self {
        Self {
            cursor_visible: false,
            mouse_capture: true,
            cursor_was_visible: false,
        }
    }
}

impl AmbientModes for RecordingModes {
    fn set_cursor_visible(&mut self, visible: bool) -> DuoResult<()> {
        self.cursor_visible = visible;
        if visible {
            self.cursor_was_visible = true;
        }
        Ok(())
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> DuoResult<()> {
        self.mouse_capture = enabled;
        Ok(())
    }

    fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    fn mouse_capture(&self) -> bool {
        self.mouse_capture
    }
}

fn test_terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(80, 24)).unwrap()
}

fn screen() -> Rect {
    Rect::new(0, 0, 80, 24)
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn key_with(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

fn release(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Up(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn scroll_down(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn chars(text: &str) -> Vec<Event> {
    text.chars().map(|c| key(KeyCode::Char(c))).collect()
}

/// 좌측 패널에 a.txt/sub 가 있는 앱 픽스처
///
/// 좌측: a.txt ("hi") + sub/y.txt ("bye"), 우측: 빈 디렉토리.
fn app_with_dirs() -> (App, TempDir, TempDir) {
    let left = TempDir::new().unwrap();
    let right = TempDir::new().unwrap();

    fs::write(left.path().join("a.txt"), "hi").unwrap();
    fs::create_dir(left.path().join("sub")).unwrap();
    fs::write(left.path().join("sub").join("y.txt"), "bye").unwrap();

    let mut app = App::new_for_test();
    app.left_panel.current_path = left.path().to_path_buf();
    app.right_panel.current_path = right.path().to_path_buf();
    app.reload_panels();

    app.layout
        .update(screen(), crate::core::actions::button_labels());
    app.sync_panel_viewports();

    (app, left, right)
}

/// 다이얼로그 없는 이벤트 전달
fn send(app: &mut App, terminal: &mut Terminal<TestBackend>, event: Event) -> Flow {
    let mut events = ScriptedEvents::new(vec![]);
    let mut modes = RecordingModes::new();
    input::handle_event(app, terminal, &mut events, &mut modes, event).unwrap()
}

/// 다이얼로그 세션이 소비할 스크립트와 함께 이벤트 전달
fn send_with_script(
    app: &mut App,
    terminal: &mut Terminal<TestBackend>,
    events: &mut ScriptedEvents,
    event: Event,
) -> Flow {
    let mut modes = RecordingModes::new();
    input::handle_event(app, terminal, events, &mut modes, event).unwrap()
}

fn entry_names(app: &App) -> Vec<String> {
    app.left_panel
        .entries
        .iter()
        .map(|e| e.name.clone())
        .collect()
}

fn select_entry(app: &mut App, name: &str) {
    let index = app
        .active_panel_state()
        .entries
        .iter()
        .position(|e| e.name == name)
        .unwrap();
    app.active_panel_state_mut().selected_index = index;
}

/// 패널 내부에서 해당 엔트리 행의 화면 좌표
fn row_position(app: &App, which: crate::ui::ActivePanel, name: &str) -> (u16, u16) {
    let area = app.layout.panel_area(which);
    let panel = app.panel(which);
    let index = panel.entries.iter().position(|e| e.name == name).unwrap();
    let row = area.y + 1 + (index - panel.scroll_offset) as u16;
    (area.x + 2, row)
}

// === 디스패처 ===

#[test]
fn test_quit_keys() {
    let mut terminal = test_terminal();
    let mut app = App::new_for_test();

    assert_eq!(
        send(&mut app, &mut terminal, key(KeyCode::Char('q'))),
        Flow::Quit
    );
    assert_eq!(
        send(
            &mut app,
            &mut terminal,
            key_with(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ),
        Flow::Quit
    );
}

#[test]
fn test_tab_toggles_active_panel() {
    let mut terminal = test_terminal();
    let mut app = App::new_for_test();
    assert_eq!(app.active_panel(), ActivePanel::Left);

    assert_eq!(
        send(&mut app, &mut terminal, key(KeyCode::Tab)),
        Flow::Continue
    );
    assert_eq!(app.active_panel(), ActivePanel::Right);
}

#[test]
fn test_resize_updates_layout_immediately() {
    let mut terminal = test_terminal();
    let mut app = App::new_for_test();

    send(&mut app, &mut terminal, Event::Resize(100, 30));

    assert_eq!(app.layout.terminal_size(), (100, 30));
    assert_eq!(app.left_panel.viewport_height, 28);
}

/// 시나리오: [".", "..", "a.txt", "sub"] 목록에서 ".." 에서 +1 이동은
/// a.txt, 파일 위에서의 Enter는 경로를 바꾸지 않는다.
#[test]
fn test_selection_and_enter_scenario() {
    let mut terminal = test_terminal();
    let (mut app, left, _right) = app_with_dirs();

    assert_eq!(entry_names(&app), vec![".", "..", "a.txt", "sub"]);
    assert_eq!(app.left_panel.selected_index, 1); // ".." 기본 선택

    send(&mut app, &mut terminal, key(KeyCode::Down));
    assert_eq!(
        app.left_panel.entries[app.left_panel.selected_index].name,
        "a.txt"
    );

    // 파일 위에서의 Enter는 no-op
    let before = app.left_panel.current_path.clone();
    assert_eq!(
        send(&mut app, &mut terminal, key(KeyCode::Enter)),
        Flow::Continue
    );
    assert_eq!(app.left_panel.current_path, before);
    drop(left);
}

#[test]
fn test_enter_key_enters_directory() {
    let mut terminal = test_terminal();
    let (mut app, left, _right) = app_with_dirs();

    select_entry(&mut app, "sub");
    send(&mut app, &mut terminal, key(KeyCode::Enter));

    assert_eq!(
        app.left_panel.current_path,
        left.path().join("sub").canonicalize().unwrap()
    );
    assert!(app.left_panel.entries.iter().any(|e| e.name == "y.txt"));
}

#[test]
fn test_hotkey_on_pseudo_entry_is_noop() {
    let mut terminal = test_terminal();
    let (mut app, _left, _right) = app_with_dirs();

    // ".." 선택 상태에서 복사 핫키는 다이얼로그 없이 복귀해야 한다
    let mut events = ScriptedEvents::new(vec![]);
    let flow = send_with_script(&mut app, &mut terminal, &mut events, key(KeyCode::Char('c')));

    assert_eq!(flow, Flow::Continue);
    assert!(events.is_empty());
}

// === 파일 작업 흐름 ===

#[test]
fn test_copy_flow_end_to_end() {
    let mut terminal = test_terminal();
    let (mut app, left, right) = app_with_dirs();

    select_entry(&mut app, "a.txt");

    // 입력 다이얼로그는 우측 경로로 미리 채워져 있어 Enter로 수락된다
    let mut events = ScriptedEvents::new(vec![key(KeyCode::Enter)]);
    send_with_script(&mut app, &mut terminal, &mut events, key(KeyCode::Char('c')));

    assert_eq!(
        fs::read_to_string(right.path().join("a.txt")).unwrap(),
        "hi"
    );
    // 소스는 그대로
    assert!(left.path().join("a.txt").exists());
    assert!(app.active_toast().is_some());
    // 우측 패널도 새로고침됨
    assert!(app.right_panel.entries.iter().any(|e| e.name == "a.txt"));
}

#[test]
fn test_copy_directory_tree_via_hotkey() {
    let mut terminal = test_terminal();
    let (mut app, _left, right) = app_with_dirs();

    select_entry(&mut app, "sub");

    let mut events = ScriptedEvents::new(vec![key(KeyCode::Enter)]);
    send_with_script(&mut app, &mut terminal, &mut events, key(KeyCode::Char('c')));

    assert_eq!(
        fs::read_to_string(right.path().join("sub").join("y.txt")).unwrap(),
        "bye"
    );
}

#[test]
fn test_copy_cancelled_with_escape() {
    let mut terminal = test_terminal();
    let (mut app, _left, right) = app_with_dirs();

    select_entry(&mut app, "a.txt");

    let mut events = ScriptedEvents::new(vec![key(KeyCode::Esc)]);
    send_with_script(&mut app, &mut terminal, &mut events, key(KeyCode::Char('c')));

    assert!(!right.path().join("a.txt").exists());
}

#[test]
fn test_move_flow_end_to_end() {
    let mut terminal = test_terminal();
    let (mut app, left, right) = app_with_dirs();

    select_entry(&mut app, "a.txt");

    let mut events = ScriptedEvents::new(vec![key(KeyCode::Enter)]);
    send_with_script(&mut app, &mut terminal, &mut events, key(KeyCode::Char('m')));

    assert!(!left.path().join("a.txt").exists());
    assert_eq!(
        fs::read_to_string(right.path().join("a.txt")).unwrap(),
        "hi"
    );
}

#[test]
fn test_delete_flow_confirm() {
    let mut terminal = test_terminal();
    let (mut app, left, _right) = app_with_dirs();

    select_entry(&mut app, "sub");

    // 기본 포커스는 수락 버튼이므로 Enter가 삭제를 확정한다
    let mut events = ScriptedEvents::new(vec![key(KeyCode::Enter)]);
    send_with_script(&mut app, &mut terminal, &mut events, key(KeyCode::Char('d')));

    assert!(!left.path().join("sub").exists());
}

#[test]
fn test_delete_flow_escape_keeps_tree() {
    let mut terminal = test_terminal();
    let (mut app, left, _right) = app_with_dirs();

    select_entry(&mut app, "sub");

    let mut events = ScriptedEvents::new(vec![key(KeyCode::Esc)]);
    send_with_script(&mut app, &mut terminal, &mut events, key(KeyCode::Char('d')));

    assert!(left.path().join("sub").join("y.txt").exists());
}

#[test]
fn test_mkdir_flow() {
    let mut terminal = test_terminal();
    let (mut app, left, _right) = app_with_dirs();

    let mut script = chars("newdir");
    script.push(key(KeyCode::Enter));
    let mut events = ScriptedEvents::new(script);
    send_with_script(&mut app, &mut terminal, &mut events, key(KeyCode::Char('n')));

    assert!(left.path().join("newdir").is_dir());
    assert!(app.left_panel.entries.iter().any(|e| e.name == "newdir"));
}

// === 마우스 ===

#[test]
fn test_mouse_click_selects_panel_and_row() {
    let mut terminal = test_terminal();
    let (mut app, _left, _right) = app_with_dirs();

    // 우측 패널 영역 클릭 -> 활성 패널 전환
    send(&mut app, &mut terminal, release(60, 5));
    assert_eq!(app.active_panel(), ActivePanel::Right);

    // 좌측 패널의 a.txt 행 클릭 -> 활성 전환 + 행 선택
    let (col, row) = row_position(&app, ActivePanel::Left, "a.txt");
    send(&mut app, &mut terminal, release(col, row));

    assert_eq!(app.active_panel(), ActivePanel::Left);
    assert_eq!(
        app.left_panel.entries[app.left_panel.selected_index].name,
        "a.txt"
    );
}

#[test]
fn test_double_release_enters_directory() {
    let mut terminal = test_terminal();
    let (mut app, left, _right) = app_with_dirs();

    let (col, row) = row_position(&app, ActivePanel::Left, "sub");
    send(&mut app, &mut terminal, release(col, row));
    send(&mut app, &mut terminal, release(col, row));

    assert_eq!(
        app.left_panel.current_path,
        left.path().join("sub").canonicalize().unwrap()
    );
    // 진입 후 추적은 리셋된다
    assert!(app.last_row_click.is_none());
}

#[test]
fn test_nonmatching_click_resets_double_click_tracker() {
    let mut terminal = test_terminal();
    let (mut app, left, _right) = app_with_dirs();

    let (col, sub_row) = row_position(&app, ActivePanel::Left, "sub");
    let (_, file_row) = row_position(&app, ActivePanel::Left, "a.txt");

    send(&mut app, &mut terminal, release(col, sub_row));
    send(&mut app, &mut terminal, release(col, file_row));
    send(&mut app, &mut terminal, release(col, sub_row));

    // sub 는 연속 두 번 클릭된 적이 없으므로 진입하지 않는다
    assert_eq!(app.left_panel.current_path, left.path().to_path_buf());
}

#[test]
fn test_scroll_wheel_moves_selection() {
    let mut terminal = test_terminal();
    let (mut app, _left, _right) = app_with_dirs();

    let before = app.left_panel.selected_index;
    send(&mut app, &mut terminal, scroll_down(10, 5));

    assert_eq!(app.left_panel.selected_index, before + 1);
}

#[test]
fn test_button_bar_click_runs_action() {
    let mut terminal = test_terminal();
    let (mut app, _left, _right) = app_with_dirs();

    // Quit 버튼은 액션이 없으므로 종료 신호
    let quit_index = crate::core::actions::find_button_by_hotkey('q').unwrap();
    let rect = app.layout.button_rects()[quit_index];

    assert_eq!(
        send(&mut app, &mut terminal, release(rect.x, rect.y)),
        Flow::Quit
    );
}

// === 다이얼로그 세션 ===

#[test]
fn test_run_confirm_escape_rejects_and_restores_modes() {
    let mut terminal = test_terminal();
    let mut app = App::new_for_test();

    let mut events = ScriptedEvents::new(vec![key(KeyCode::Esc)]);
    let mut modes = RecordingModes::new();
    let state = ConfirmState::new("Delete file", "a.txt", None, "Delete", "Cancel");

    let accepted =
        dialogs::run_confirm(&mut terminal, &mut events, &mut modes, &mut app, state).unwrap();

    assert!(!accepted);
    assert!(!modes.cursor_visible());
    assert!(modes.mouse_capture());
}

#[test]
fn test_run_confirm_accept_via_mouse() {
    let mut terminal = test_terminal();
    let mut app = App::new_for_test();

    // 루프 첫 draw가 쓸 지오메트리를 미리 계산해 클릭 좌표를 얻는다
    let mut probe = ConfirmState::new("Delete file", "a.txt", None, "Delete", "Cancel");
    probe.resize(screen());
    let accept = probe.geometry.accept_button;

    let mut events = ScriptedEvents::new(vec![release(accept.x + 1, accept.y)]);
    let mut modes = RecordingModes::new();
    let state = ConfirmState::new("Delete file", "a.txt", None, "Delete", "Cancel");

    let accepted =
        dialogs::run_confirm(&mut terminal, &mut events, &mut modes, &mut app, state).unwrap();

    assert!(accepted);
}

#[test]
fn test_run_confirm_tab_then_enter_rejects() {
    let mut terminal = test_terminal();
    let mut app = App::new_for_test();

    let mut events = ScriptedEvents::new(vec![key(KeyCode::Tab), key(KeyCode::Enter)]);
    let mut modes = RecordingModes::new();
    let state = ConfirmState::new("Delete file", "a.txt", None, "Delete", "Cancel");

    let accepted =
        dialogs::run_confirm(&mut terminal, &mut events, &mut modes, &mut app, state).unwrap();

    assert!(!accepted);
}

#[test]
fn test_run_confirm_survives_resize() {
    let mut terminal = test_terminal();
    let mut app = App::new_for_test();

    // 리사이즈 후에도 포커스를 잃지 않고 Enter로 수락된다
    let mut events = ScriptedEvents::new(vec![Event::Resize(100, 30), key(KeyCode::Enter)]);
    let mut modes = RecordingModes::new();
    let state = ConfirmState::new("Delete file", "a.txt", None, "Delete", "Cancel");

    let accepted =
        dialogs::run_confirm(&mut terminal, &mut events, &mut modes, &mut app, state).unwrap();

    assert!(accepted);
}

#[test]
fn test_run_input_accept_returns_buffer() {
    let mut terminal = test_terminal();
    let mut app = App::new_for_test();

    let mut script = chars("hello");
    script.push(key(KeyCode::Enter));
    let mut events = ScriptedEvents::new(script);
    let mut modes = RecordingModes::new();
    let state = InputState::new("Make directory", "Enter the directory name:", "");

    let value =
        dialogs::run_input(&mut terminal, &mut events, &mut modes, &mut app, state).unwrap();

    assert_eq!(value.as_deref(), Some("hello"));
    // 진입 시 커서를 켰고, 종료 시 원래대로 복원됐다
    assert!(modes.cursor_was_visible);
    assert!(!modes.cursor_visible());
}

#[test]
fn test_run_input_empty_enter_stays_open() {
    let mut terminal = test_terminal();
    let mut app = App::new_for_test();

    // 빈 버퍼의 Enter는 세션을 유지하고, Escape가 거부로 종결한다
    let mut events = ScriptedEvents::new(vec![key(KeyCode::Enter), key(KeyCode::Esc)]);
    let mut modes = RecordingModes::new();
    let state = InputState::new("Make directory", "Enter the directory name:", "");

    let value =
        dialogs::run_input(&mut terminal, &mut events, &mut modes, &mut app, state).unwrap();

    assert!(value.is_none());
    assert!(events.is_empty());
    assert!(!modes.cursor_visible());
}

#[test]
fn test_run_input_resize_preserves_buffer() {
    let mut terminal = test_terminal();
    let mut app = App::new_for_test();

    let mut events = ScriptedEvents::new(vec![
        key(KeyCode::Char('a')),
        Event::Resize(100, 30),
        key(KeyCode::Char('b')),
        key(KeyCode::Enter),
    ]);
    let mut modes = RecordingModes::new();
    let state = InputState::new("Copy", "Enter the destination path:", "");

    let value =
        dialogs::run_input(&mut terminal, &mut events, &mut modes, &mut app, state).unwrap();

    assert_eq!(value.as_deref(), Some("ab"));
}

#[test]
fn test_run_input_restores_modes_on_event_source_error() {
    let mut terminal = test_terminal();
    let mut app = App::new_for_test();

    // 이벤트 소스 고갈 -> 에러 전파, 그래도 모드는 복원된다
    let mut events = ScriptedEvents::new(vec![key(KeyCode::Char('x'))]);
    let mut modes = RecordingModes::new();
    let state = InputState::new("Copy", "Enter the destination path:", "");

    let result = dialogs::run_input(&mut terminal, &mut events, &mut modes, &mut app, state);

    assert!(result.is_err());
    assert!(!modes.cursor_visible());
    assert!(modes.mouse_capture());
}

// === 설정 저장/복원 ===

#[test]
fn test_settings_round_trip() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().to_path_buf();

    let mut app = App::new_for_test();
    app.theme_manager.switch_theme("light").unwrap();
    app.left_panel.current_path = dir.clone();
    app.right_panel.current_path = dir.clone();
    app.save_persisted_state().unwrap();

    let mut restored = App::new_for_test();
    restored.state_store_override = app.state_store_override.clone();
    restored.load_persisted_state();

    assert_eq!(restored.theme_manager.current_name(), "light");
    assert_eq!(restored.left_panel.current_path, dir);
}

#[test]
fn test_settings_version_mismatch_rejected() {
    let data = "version = 999\ntheme = \"light\"\nleft_path = \"/\"\nright_path = \"/\"\n";
    assert!(App::decode_app_state(data).is_none());

    let current = format!(
        "version = {}\ntheme = \"light\"\nleft_path = \"/\"\nright_path = \"/\"\n",
        App::APP_STATE_VERSION
    );
    assert!(App::decode_app_state(&current).is_some());
}

#[test]
fn test_quit_saves_state() {
    let mut app = App::new_for_test();
    let path = app.state_store_override.clone().unwrap();

    app.quit();

    assert!(app.should_quit());
    assert!(path.exists());
    let _ = fs::remove_file(path);
}

#[test]
fn test_toast_is_visible_after_set() {
    let mut app = App::new_for_test();
    assert!(app.active_toast().is_none());

    app.set_toast("Copied: a.txt");
    assert_eq!(app.active_toast(), Some("Copied: a.txt"));
}

#[test]
fn test_double_click_window_expiry() {
    let mut app = App::new_for_test();

    // 첫 클릭은 더블 클릭이 아니다
    assert!(!app.register_row_click(ActivePanel::Left, 3));
    // 시간 창 안의 같은 행 두 번째 클릭은 더블 클릭
    assert!(app.register_row_click(ActivePanel::Left, 3));
    // 판정 후 추적이 리셋되어 다시 처음부터
    assert!(!app.register_row_click(ActivePanel::Left, 3));

    // 다른 패널의 같은 행은 매칭되지 않는다
    assert!(!app.register_row_click(ActivePanel::Right, 3));
}
