#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use quickpick_cli::menu::{run_multi_with, run_with, AnsiKeyReader, ScriptedKeyReader};
    use quickpick_core::error::Error;
    use quickpick_core::key::{KeyPress, CTRL_C, DOWN, UP};
    use quickpick_core::menu::Menu;

    fn up() -> KeyPress {
        KeyPress::Special(UP)
    }

    fn down() -> KeyPress {
        KeyPress::Special(DOWN)
    }

    fn enter() -> KeyPress {
        KeyPress::Normal('\r')
    }

    fn sample_menu() -> Menu<String> {
        let mut menu = Menu::new("Main Menu");
        for label in ["Start", "Settings", "Help", "Exit"] {
            menu.add_option(label, label.to_lowercase());
        }
        menu
    }

    #[test]
    fn test_down_down_enter_selects_third_option() {
        let mut reader = ScriptedKeyReader::new([down(), down(), enter()]);
        let mut out = Vec::new();

        let result = run_with(sample_menu(), &mut reader, &mut out).unwrap();
        assert_eq!(result, Some("help".to_string()));
    }

    #[test]
    fn test_selection_invokes_callback_with_payload() {
        let invoked = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&invoked);

        let mut menu = Menu::new("Main Menu");
        menu.add_option("Start", "start".to_string());
        menu.add_option_with("Help", "help".to_string(), move |payload| {
            flag.store(true, Ordering::SeqCst);
            format!("showing {payload}")
        });

        let mut reader = ScriptedKeyReader::new([down(), enter()]);
        let result = run_with(menu, &mut reader, &mut Vec::new()).unwrap();

        assert_eq!(result, Some("showing help".to_string()));
        assert!(invoked.load(Ordering::SeqCst));
    }

    #[test]
    fn test_quit_returns_none_and_skips_callbacks() {
        let invoked = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&invoked);

        let mut menu = Menu::new("Main Menu");
        menu.add_option_with("Start", "start".to_string(), move |payload| {
            flag.store(true, Ordering::SeqCst);
            payload
        });
        menu.add_option("Exit", "exit".to_string());

        let mut reader = ScriptedKeyReader::new([down(), KeyPress::Normal('q')]);
        let result = run_with(menu, &mut reader, &mut Vec::new()).unwrap();

        assert_eq!(result, None);
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[test]
    fn test_enter_without_callback_returns_payload_unchanged() {
        let mut menu = Menu::new("t");
        menu.add_option("Only", "payload".to_string());

        let mut reader = ScriptedKeyReader::new([enter()]);
        let result = run_with(menu, &mut reader, &mut Vec::new()).unwrap();
        assert_eq!(result, Some("payload".to_string()));
    }

    #[test]
    fn test_navigation_clamps_at_both_ends() {
        let many_downs: Vec<KeyPress> = std::iter::repeat(down())
            .take(10)
            .chain([enter()])
            .collect();
        let mut reader = ScriptedKeyReader::new(many_downs);
        let result = run_with(sample_menu(), &mut reader, &mut Vec::new()).unwrap();
        assert_eq!(result, Some("exit".to_string()));

        let mut reader = ScriptedKeyReader::new([up(), up(), enter()]);
        let result = run_with(sample_menu(), &mut reader, &mut Vec::new()).unwrap();
        assert_eq!(result, Some("start".to_string()));
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let mut reader = ScriptedKeyReader::new([
            KeyPress::Normal('x'),
            KeyPress::Special('C'),
            down(),
            enter(),
        ]);
        let result = run_with(sample_menu(), &mut reader, &mut Vec::new()).unwrap();
        assert_eq!(result, Some("settings".to_string()));
    }

    #[test]
    fn test_empty_menu_fails_before_rendering() {
        let menu: Menu<String> = Menu::new("Empty");
        let mut reader = ScriptedKeyReader::new([]);
        let mut out = Vec::new();

        let result = run_with(menu, &mut reader, &mut out);
        assert!(matches!(result, Err(Error::EmptyMenu)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_render_marks_selected_row() {
        let mut reader = ScriptedKeyReader::new([enter()]);
        let mut out = Vec::new();
        run_with(sample_menu(), &mut reader, &mut out).unwrap();

        let rendered = String::from_utf8_lossy(&out);
        assert!(rendered.contains("Main Menu"));
        assert!(rendered.contains(">Start"));
        assert!(rendered.contains(" Settings"));
        assert!(rendered.contains(" Exit"));
    }

    #[test]
    fn test_ansi_byte_stream_drives_menu() {
        // Two down arrows as raw escape sequences, then carriage return.
        let mut reader = AnsiKeyReader::new(Cursor::new(b"\x1b[B\x1b[B\r".to_vec()));
        let result = run_with(sample_menu(), &mut reader, &mut Vec::new()).unwrap();
        assert_eq!(result, Some("help".to_string()));
    }

    #[test]
    fn test_multi_select_space_toggles_and_enter_confirms() {
        let labels = ["Start", "Settings", "Help", "Exit"];
        let mut reader = ScriptedKeyReader::new([
            KeyPress::Normal(' '),
            down(),
            down(),
            KeyPress::Normal(' '),
            enter(),
        ]);

        let result = run_multi_with("Pick any", &labels, &mut reader, &mut Vec::new()).unwrap();
        assert_eq!(result, Some(vec![0, 2]));
    }

    #[test]
    fn test_multi_select_enter_with_nothing_toggled_is_empty() {
        let labels = ["A", "B"];
        let mut reader = ScriptedKeyReader::new([enter()]);
        let result = run_multi_with("Pick any", &labels, &mut reader, &mut Vec::new()).unwrap();
        assert_eq!(result, Some(Vec::new()));
    }

    #[test]
    fn test_multi_select_quit_returns_none() {
        let labels = ["A", "B"];
        let mut reader = ScriptedKeyReader::new([KeyPress::Normal(' '), KeyPress::Normal('q')]);
        let result = run_multi_with("Pick any", &labels, &mut reader, &mut Vec::new()).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_multi_select_empty_labels_fail_before_rendering() {
        let labels: [&str; 0] = [];
        let mut reader = ScriptedKeyReader::new([]);
        let mut out = Vec::new();

        let result = run_multi_with("Pick any", &labels, &mut reader, &mut out);
        assert!(matches!(result, Err(Error::EmptyMenu)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_multi_select_render_marks_cursor_and_choices() {
        let labels = ["Start", "Settings"];
        let mut reader = ScriptedKeyReader::new([KeyPress::Normal(' '), enter()]);
        let mut out = Vec::new();
        run_multi_with("Pick any", &labels, &mut reader, &mut out).unwrap();

        let rendered = String::from_utf8_lossy(&out);
        assert!(rendered.contains(">[ ] Start"));
        assert!(rendered.contains(" [ ] Settings"));
        assert!(rendered.contains(">[x] Start"));
    }

    #[test]
    fn test_multi_select_ctrl_c_surfaces_as_interrupted() {
        let labels = ["A"];
        let mut reader = ScriptedKeyReader::new([KeyPress::Normal(CTRL_C)]);
        let result = run_multi_with("Pick any", &labels, &mut reader, &mut Vec::new());
        assert!(matches!(result, Err(Error::Interrupted)));
    }

    #[test]
    fn test_ctrl_c_surfaces_as_interrupted() {
        let mut reader = ScriptedKeyReader::new([KeyPress::Normal(CTRL_C)]);
        let result = run_with(sample_menu(), &mut reader, &mut Vec::new());
        assert!(matches!(result, Err(Error::Interrupted)));
    }

    #[test]
    fn test_reader_failure_propagates() {
        let mut reader = ScriptedKeyReader::new([down()]);
        let result = run_with(sample_menu(), &mut reader, &mut Vec::new());
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
