use trophy_chase_core::{Command, Direction};
use trophy_chase_system_controller::{Controller, HeldKeys};

#[test]
fn horizontal_keys_win_over_vertical() {
    let keys = HeldKeys {
        right: false,
        left: true,
        up: true,
        down: true,
    };
    assert_eq!(keys.resolve(), Some(Direction::Left));
}

#[test]
fn positive_direction_wins_within_an_axis() {
    let horizontal = HeldKeys {
        right: true,
        left: true,
        ..HeldKeys::NONE
    };
    let vertical = HeldKeys {
        up: true,
        down: true,
        ..HeldKeys::NONE
    };
    assert_eq!(horizontal.resolve(), Some(Direction::Right));
    assert_eq!(vertical.resolve(), Some(Direction::Up));
}

#[test]
fn single_key_maps_to_its_direction() {
    for direction in [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ] {
        assert_eq!(HeldKeys::only(direction).resolve(), Some(direction));
    }
}

#[test]
fn controller_emits_one_steer_command_per_frame() {
    let controller = Controller;
    let mut commands = Vec::new();

    controller.handle(HeldKeys::NONE, &mut commands);
    controller.handle(HeldKeys::only(Direction::Down), &mut commands);

    assert_eq!(
        commands,
        vec![
            Command::SteerPlayer { direction: None },
            Command::SteerPlayer {
                direction: Some(Direction::Down)
            },
        ]
    );
}
