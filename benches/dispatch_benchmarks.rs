use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use smart_remote::{Command, CommandHandle, Dispatcher, Light, Thermostat, shared};

/// Fresh remote per batch so the history log does not grow across iterations
fn remote_with(on: &CommandHandle, off: &CommandHandle) -> Dispatcher {
    let mut remote = Dispatcher::new();
    remote.bind(0, on.clone(), off.clone());
    remote
}

/// Benchmark a press followed by its undo on a single light
fn bench_press_undo(c: &mut Criterion) {
    let light = shared(Light::new("bench"));
    let on = Command::turn_on(light.clone()).into_handle();
    let off = Command::turn_off(light).into_handle();

    c.bench_function("press_on_then_undo", |b| {
        b.iter_batched(
            || remote_with(&on, &off),
            |mut remote| {
                black_box(remote.press_on(0)).ok();
                black_box(remote.press_undo()).ok();
                remote
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark macro execute/undo for growing member counts
fn bench_macro(c: &mut Criterion) {
    let mut group = c.benchmark_group("macro");

    for size in [2usize, 8, 32] {
        let members = (0..size)
            .map(|i| {
                let thermostat = shared(Thermostat::new(format!("room {}", i)));
                Command::set_temperature(thermostat, 19.0 + i as f64).into_handle()
            })
            .collect();
        let scene = Command::macro_of(members).into_handle();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter_batched(
                || remote_with(&scene, &scene),
                |mut remote| {
                    black_box(remote.press_on(0)).ok();
                    black_box(remote.press_undo()).ok();
                    remote
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_press_undo, bench_macro);
criterion_main!(benches);
