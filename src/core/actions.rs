#![allow(dead_code)]
//! 액션 시스템 — 단일 진실 원천 (Single Source of Truth)
//!
//! 모든 키 바인딩과 하단 버튼이 이 모듈의 레지스트리를 참조합니다.

use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::LazyLock;

/// 모든 가능한 액션의 열거
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    TogglePanel,
    EnterSelected,
    // File Operations
    Copy,
    Move,
    Delete,
    MakeDirectory,
    OpenEditor,
    // System
    Refresh,
    Quit,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

/// 하단 버튼 정의
///
/// 핫키는 대소문자 구분 없이 매칭된다. `action`이 None인 버튼은
/// 프로그램 종료 신호로 해석된다.
pub struct ButtonDef {
    pub label: &'static str,
    pub hotkey: char,
    pub action: Option<Action>,
}

/// 하단 버튼 목록
pub static BUTTON_DEFS: &[ButtonDef] = &[
    ButtonDef {
        label: "Copy (c)",
        hotkey: 'c',
        action: Some(Action::Copy),
    },
    ButtonDef {
        label: "Move (m)",
        hotkey: 'm',
        action: Some(Action::Move),
    },
    ButtonDef {
        label: "MkDir (n)",
        hotkey: 'n',
        action: Some(Action::MakeDirectory),
    },
    ButtonDef {
        label: "Delete (d)",
        hotkey: 'd',
        action: Some(Action::Delete),
    },
    ButtonDef {
        label: "Edit (e)",
        hotkey: 'e',
        action: Some(Action::OpenEditor),
    },
    ButtonDef {
        label: "Quit (q)",
        hotkey: 'q',
        action: None,
    },
];

fn build_key_bindings() -> Vec<KeyBinding> {
    vec![
        // 종료
        KeyBinding {
            code: KeyCode::Char('q'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Quit,
        },
        KeyBinding {
            code: KeyCode::Char('Q'),
            modifiers: Some(KeyModifiers::SHIFT),
            action: Action::Quit,
        },
        KeyBinding {
            code: KeyCode::Char('c'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Quit,
        },
        // 패널
        KeyBinding {
            code: KeyCode::Tab,
            modifiers: None,
            action: Action::TogglePanel,
        },
        // 탐색
        KeyBinding {
            code: KeyCode::Up,
            modifiers: None,
            action: Action::MoveUp,
        },
        KeyBinding {
            code: KeyCode::Down,
            modifiers: None,
            action: Action::MoveDown,
        },
        KeyBinding {
            code: KeyCode::Enter,
            modifiers: None,
            action: Action::EnterSelected,
        },
        // 새로고침
        KeyBinding {
            code: KeyCode::Char('r'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Refresh,
        },
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
    for binding in key_bindings() {
        let code_matches = binding.code == code;
        let mod_matches = match binding.modifiers {
            None => true, // any modifier
            Some(required) => modifiers == required,
        };
        if code_matches && mod_matches {
            return Some(binding.action);
        }
    }
    None
}

/// 핫키 문자로 버튼 인덱스 조회 (대소문자 무시)
pub fn find_button_by_hotkey(c: char) -> Option<usize> {
    BUTTON_DEFS
        .iter()
        .position(|button| button.hotkey.eq_ignore_ascii_case(&c))
}

static BUTTON_LABELS: LazyLock<Vec<&'static str>> =
    LazyLock::new(|| BUTTON_DEFS.iter().map(|b| b.label).collect());

/// 버튼 라벨 목록 (레이아웃/렌더링용)
pub fn button_labels() -> &'static [&'static str] {
    BUTTON_LABELS.as_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_action_basic_keys() {
        assert_eq!(
            find_action(KeyModifiers::NONE, KeyCode::Up),
            Some(Action::MoveUp)
        );
        assert_eq!(
            find_action(KeyModifiers::NONE, KeyCode::Down),
            Some(Action::MoveDown)
        );
        assert_eq!(
            find_action(KeyModifiers::NONE, KeyCode::Tab),
            Some(Action::TogglePanel)
        );
        assert_eq!(
            find_action(KeyModifiers::NONE, KeyCode::Enter),
            Some(Action::EnterSelected)
        );
    }

    #[test]
    fn test_quit_bindings() {
        assert_eq!(
            find_action(KeyModifiers::NONE, KeyCode::Char('q')),
            Some(Action::Quit)
        );
        assert_eq!(
            find_action(KeyModifiers::SHIFT, KeyCode::Char('Q')),
            Some(Action::Quit)
        );
        assert_eq!(
            find_action(KeyModifiers::CONTROL, KeyCode::Char('c')),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_unbound_key_returns_none() {
        assert_eq!(find_action(KeyModifiers::NONE, KeyCode::Char('z')), None);
    }

    #[test]
    fn test_hotkey_lookup_is_case_insensitive() {
        let copy = find_button_by_hotkey('c').unwrap();
        assert_eq!(find_button_by_hotkey('C'), Some(copy));
        assert_eq!(BUTTON_DEFS[copy].action, Some(Action::Copy));

        assert_eq!(find_button_by_hotkey('?'), None);
    }

    #[test]
    fn test_quit_button_has_no_action() {
        let quit = find_button_by_hotkey('q').unwrap();
        assert!(BUTTON_DEFS[quit].action.is_none());
    }

    #[test]
    fn test_button_labels_match_defs() {
        assert_eq!(button_labels().len(), BUTTON_DEFS.len());
        assert_eq!(button_labels()[0], BUTTON_DEFS[0].label);
    }
}
