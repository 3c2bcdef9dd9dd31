use std::{sync::Arc, time::Duration};
use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    runtime::Builder,
};

use hap_delegate::{
    hap::characteristic_type::CharacteristicType,
    store::MemoryStore,
    uuid::ShortUuid,
    CharacteristicDelegate, DelegateParams, Service, Value,
};
use uuid::Uuid;

fn main() {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build runtime");

    runtime.block_on(start_app());
}

async fn start_app() {
    std::env::set_var("RUST_LOG", "info");
    if let Err(err) = pretty_env_logger::try_init() {
        eprintln!("WARNING: failed to initialize logging framework: {}", err);
    }

    let context = MemoryStore::new();
    let service = Arc::new(Service::new(
        "Desk Lamp",
        Uuid::from_short(0x43),
        Arc::new(context.clone()),
    ));

    let on = match CharacteristicDelegate::new(
        &service,
        DelegateParams::new("on")
            .characteristic(CharacteristicType::On)
            .value(false)
            .with_write_hook(|value| async move {
                // pretend the bulb takes a moment
                tokio::time::sleep(Duration::from_millis(100)).await;
                log::info!("bulb switched {value}");
                Ok(())
            }),
    ) {
        Ok(delegate) => delegate,
        Err(err) => {
            log::error!("Error creating On delegate: {}", err);
            return;
        }
    };

    let brightness = match CharacteristicDelegate::new(
        &service,
        DelegateParams::new("brightness")
            .characteristic(CharacteristicType::Brightness)
            .value(40)
            .timeout_ms(500)
            .with_write_hook(|_| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Ok(())
            }),
    ) {
        Ok(delegate) => delegate,
        Err(err) => {
            log::error!("Error creating Brightness delegate: {}", err);
            return;
        }
    };

    on.on_did_set(|value, by_controller| {
        log::info!("on did set {value} (controller: {by_controller})")
    });

    if let Some(characteristic) = on.characteristic() {
        let res = characteristic.handle_write(Value::Bool(true)).await;
        log::info!("controller write On: {:?}", res.response);
    }

    // the slow hook misses its deadline
    if let Some(characteristic) = brightness.characteristic() {
        let res = characteristic.handle_write(Value::Int(150)).await;
        log::info!("controller write Brightness: {:?}", res.response);
    }

    // Type a value to set Brightness from the application side
    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(input)) => match input.trim().parse::<i64>() {
                Ok(n) => {
                    brightness.set(n);
                    println!("context: {}", context.to_json().unwrap_or_default());
                }
                Err(err) => log::error!("Not a number: {}", err),
            },
            Ok(None) => break,
            Err(err) => {
                log::error!("Error reading from console: {}", err);
                break;
            }
        }
    }
}
