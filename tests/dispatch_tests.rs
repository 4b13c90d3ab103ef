use clay_scene::app::AppState;
use clay_scene::camera::SENSITIVITY;
use clay_scene::input::{InputEvent, Key};

#[cfg(test)]
mod dispatch_tests {
    use super::*;

    fn press(key: Key) -> InputEvent {
        InputEvent::Key { key, pressed: true }
    }

    #[test]
    fn test_first_cursor_event_leaves_camera_untouched() {
        let mut state = AppState::new();
        let (yaw, pitch) = (state.camera.yaw, state.camera.pitch);

        state.apply(InputEvent::CursorMove { x: 600.0, y: 500.0 });

        assert_eq!(state.camera.yaw, yaw);
        assert_eq!(state.camera.pitch, pitch);
    }

    #[test]
    fn test_second_cursor_event_applies_inverted_y_delta() {
        let mut state = AppState::new();
        let (yaw, pitch) = (state.camera.yaw, state.camera.pitch);

        state.apply(InputEvent::CursorMove { x: 600.0, y: 500.0 });
        state.apply(InputEvent::CursorMove { x: 615.0, y: 530.0 });

        // dx = +15, cursor moved 30 down the screen so pitch goes down.
        assert!((state.camera.yaw - (yaw + 15.0 * SENSITIVITY)).abs() < 1e-5);
        assert!((state.camera.pitch - (pitch - 30.0 * SENSITIVITY)).abs() < 1e-5);
    }

    #[test]
    fn test_resize_changes_projection_aspect_exactly() {
        let mut state = AppState::new();

        state.apply(InputEvent::Resize {
            width: 1920,
            height: 1080,
        });
        let vp = state.view_projection();

        let aspect = vp.projection.col(1).y / vp.projection.col(0).x;
        assert!((aspect - 1920.0 / 1080.0).abs() < 1e-5);
    }

    #[test]
    fn test_resize_does_not_move_the_camera() {
        let mut state = AppState::new();
        let position = state.camera.position;
        let (yaw, pitch) = (state.camera.yaw, state.camera.pitch);

        state.apply(InputEvent::Resize {
            width: 320,
            height: 240,
        });

        assert_eq!(state.camera.position, position);
        assert_eq!(state.camera.yaw, yaw);
        assert_eq!(state.camera.pitch, pitch);
    }

    #[test]
    fn test_two_held_keys_move_additively() {
        let mut state = AppState::new();
        let start = state.camera.position;
        let front = state.camera.front();
        let right = state.camera.right();
        let speed = state.camera.movement_speed;

        state.apply(press(Key::W));
        state.apply(press(Key::D));
        state.advance_frame(0.8);

        let moved = state.camera.position - start;
        let expected = front * speed * 0.8 + right * speed * 0.8;
        assert!(moved.distance(expected) < 1e-5);
    }

    #[test]
    fn test_orbit_key_sequence_ends_enabled() {
        let mut state = AppState::new();

        for key in [Key::L, Key::L, Key::K, Key::L] {
            state.apply(press(key));
        }

        assert!(state.light.is_orbiting());
    }

    #[test]
    fn test_scroll_narrows_field_of_view() {
        let mut state = AppState::new();
        let zoom = state.camera.zoom;

        state.apply(InputEvent::Scroll { dy: 5.0 });

        assert!(state.camera.zoom < zoom);
        assert!(state.camera.zoom >= 1.0);
    }

    #[test]
    fn test_light_keeps_moving_while_camera_is_idle() {
        let mut state = AppState::new();
        let light_before = state.light.position;
        let camera_before = state.camera.position;

        state.advance_frame(0.25);

        assert!(state.light.position.distance(light_before) > 0.0);
        assert_eq!(state.camera.position, camera_before);
    }
}
