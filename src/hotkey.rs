use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use tracing::info;

pub struct HotkeyManager {
    _manager: GlobalHotKeyManager,
    pub toggle_hotkey_id: u32,
}

impl HotkeyManager {
    /// Register Ctrl+Shift+M to toggle the mirror.
    pub fn new() -> Result<Self, global_hotkey::Error> {
        let manager = GlobalHotKeyManager::new()?;

        let toggle_hotkey = HotKey::new(Some(Modifiers::CONTROL | Modifiers::SHIFT), Code::KeyM);
        manager.register(toggle_hotkey)?;

        info!(id = toggle_hotkey.id(), "global hotkey registered: Ctrl+Shift+M");

        Ok(HotkeyManager {
            _manager: manager,
            toggle_hotkey_id: toggle_hotkey.id(),
        })
    }

    /// True if the toggle hotkey was pressed since the last poll.
    pub fn toggle_pressed(&self) -> bool {
        let mut pressed = false;
        while let Ok(event) = GlobalHotKeyEvent::receiver().try_recv() {
            if event.id() == self.toggle_hotkey_id && event.state() == HotKeyState::Pressed {
                pressed = true;
            }
        }
        pressed
    }
}
