//! End-to-end remote control scenarios
//!
//! Exercises the public API the way a caller would: devices shared with
//! commands, commands bound to slots, presses and undos through the dispatcher.

use smart_remote::command::MacroCommand;
use smart_remote::{
    Action, Command, CommandError, DeviceError, DispatchError, Dispatcher, Home, HomeConfig,
    Light, Thermostat, UndoableCommand, shared,
};

#[test]
fn test_light_on_then_undo() {
    let light = shared(Light::new("living room"));
    let mut remote = Dispatcher::new();
    remote.bind(
        0,
        Command::turn_on(light.clone()).into_handle(),
        Command::turn_off(light.clone()).into_handle(),
    );

    remote.press_on(0).unwrap();
    assert!(light.lock().unwrap().is_on());
    assert_eq!(remote.history().len(), 1);
    assert_eq!(remote.undo_depth(), 1);

    remote.press_undo().unwrap();
    assert!(!light.lock().unwrap().is_on());
    assert_eq!(remote.undo_depth(), 0);
    assert_eq!(remote.history().len(), 1);
}

#[test]
fn test_undo_reverts_latest_slot_only() {
    let light = shared(Light::new("hall"));
    let thermostat = shared(Thermostat::new("hall"));
    let mut remote = Dispatcher::new();
    remote.bind(
        0,
        Command::turn_on(light.clone()).into_handle(),
        Command::turn_off(light.clone()).into_handle(),
    );
    remote.bind(
        1,
        Command::set_temperature(thermostat.clone(), 25.0).into_handle(),
        Command::set_temperature(thermostat.clone(), 20.0).into_handle(),
    );

    remote.press_on(0).unwrap();
    remote.press_on(1).unwrap();
    remote.press_undo().unwrap();

    assert!(light.lock().unwrap().is_on());
    assert_eq!(thermostat.lock().unwrap().temperature(), 22.0);

    remote.press_undo().unwrap();
    assert!(!light.lock().unwrap().is_on());
    assert_eq!(remote.press_undo(), Err(DispatchError::NothingToUndo));
}

#[test]
fn test_undone_command_needs_fresh_press() {
    let light = shared(Light::new("hall"));
    let mut remote = Dispatcher::new();
    remote.bind(
        0,
        Command::turn_on(light.clone()).into_handle(),
        Command::turn_off(light.clone()).into_handle(),
    );

    remote.press_on(0).unwrap();
    remote.press_undo().unwrap();
    assert_eq!(remote.press_undo(), Err(DispatchError::NothingToUndo));

    remote.press_on(0).unwrap();
    remote.press_undo().unwrap();
    assert!(!light.lock().unwrap().is_on());
    assert_eq!(remote.history().len(), 2);
}

#[test]
fn test_history_records_presses_in_order() {
    let a = shared(Light::new("a"));
    let b = shared(Light::new("b"));
    let mut remote = Dispatcher::new();
    remote.bind(
        0,
        Command::turn_on(a.clone()).into_handle(),
        Command::turn_off(a).into_handle(),
    );
    remote.bind(
        1,
        Command::turn_on(b.clone()).into_handle(),
        Command::turn_off(b).into_handle(),
    );

    remote.press_on(0).unwrap();
    remote.press_off(1).unwrap();
    assert!(remote.press_on(99).is_err());
    remote.press_on(0).unwrap();
    remote.press_undo().unwrap();

    let history = remote.history();
    assert_eq!(history.len(), 3);
    assert_eq!(
        history
            .iter()
            .map(|entry| (entry.action(), entry.slot()))
            .collect::<Vec<_>>(),
        vec![(Action::On, 0), (Action::Off, 1), (Action::On, 0)]
    );
    assert!(
        history
            .windows(2)
            .all(|pair| pair[0].timestamp() <= pair[1].timestamp())
    );
}

#[test]
fn test_macro_partial_failure_surfaces_target_unavailable() {
    let hall = shared(Light::new("hall"));
    let thermostat = shared(Thermostat::new("cellar"));
    thermostat.lock().unwrap().set_online(false);

    let scene = Command::macro_of(vec![
        Command::turn_on(hall.clone()).into_handle(),
        Command::set_temperature(thermostat.clone(), 18.0).into_handle(),
    ])
    .into_handle();

    let mut remote = Dispatcher::new();
    remote.bind(0, scene.clone(), scene);

    let result = remote.press_on(0);
    assert_eq!(
        result,
        Err(DispatchError::Command(CommandError::TargetUnavailable(
            DeviceError::Offline("cellar".into())
        )))
    );
    assert!(!hall.lock().unwrap().is_on());
    assert!(remote.history().is_empty());
    assert!(!remote.can_undo());
}

#[test]
fn test_macro_command_used_directly() {
    let a = shared(Light::new("a"));
    let b = shared(Light::new("b"));
    let mut scene = MacroCommand::new(vec![
        Command::turn_on(a.clone()).into_handle(),
        Command::turn_on(b.clone()).into_handle(),
    ]);

    scene.execute().unwrap();
    scene.undo().unwrap();
    assert!(!a.lock().unwrap().is_on());
    assert!(!b.lock().unwrap().is_on());
}

#[test]
fn test_demo_home_session() {
    let mut home = Home::build(&HomeConfig::demo()).unwrap();
    let remote = home.dispatcher_mut();

    for slot in 0..4 {
        remote.press_on(slot).unwrap();
    }
    remote.press_undo().unwrap();
    remote.press_undo().unwrap();
    remote.press_on(3).unwrap();

    // Cinema mode is active again: lights off, warm setpoint
    assert!(!home.light("living_room").unwrap().lock().unwrap().is_on());
    assert!(!home.light("bedroom").unwrap().lock().unwrap().is_on());
    assert_eq!(
        home.thermostat("main").unwrap().lock().unwrap().temperature(),
        25.0
    );

    let report = home.dispatcher().history_report();
    assert_eq!(report.len(), 5);
    assert!(report[4].ends_with("ON slot 3 (Macro)"));
}

#[test]
fn test_home_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("home.ron");
    std::fs::write(
        &path,
        r#"(
            lights: [(id: "porch", location: "porch")],
            commands: [
                (name: "porch_on", action: TurnOn(device: "porch")),
                (name: "porch_off", action: TurnOff(device: "porch")),
            ],
            slots: [(slot: 7, on: "porch_on", off: "porch_off")],
        )"#,
    )
    .unwrap();

    let mut home = Home::build(&HomeConfig::load(&path).unwrap()).unwrap();
    home.dispatcher_mut().press_on(7).unwrap();
    assert!(home.light("porch").unwrap().lock().unwrap().is_on());

    home.dispatcher_mut().press_off(7).unwrap();
    home.dispatcher_mut().press_undo().unwrap();
    assert!(home.light("porch").unwrap().lock().unwrap().is_on());
}
