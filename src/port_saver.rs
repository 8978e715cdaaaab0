//! Rocket only learns its port at liftoff when asked to bind port 0; this
//! fairing hands the bound port to whoever spawned the server (the tests).

use rocket::fairing::Info;
use rocket::{Orbit, Rocket};
use std::sync::Mutex;
use tokio::sync::oneshot;

pub fn create_pair() -> (PortSaver, Port) {
    let (tx, rx) = oneshot::channel();
    (PortSaver::new(tx), Port::new(rx))
}

pub struct Port {
    port: Mutex<Option<u16>>,
    rx: Mutex<Option<oneshot::Receiver<u16>>>,
}

impl Port {
    fn new(rx: oneshot::Receiver<u16>) -> Port {
        Port {
            port: Mutex::new(None),
            rx: Mutex::new(Some(rx)),
        }
    }

    /// Waits for liftoff on first use, then answers from the cache.
    /// Single consumer; a second concurrent first call panics.
    pub async fn get(&self) -> u16 {
        if let Some(port) = *self.port.lock().unwrap() {
            return port;
        }
        let rx = self
            .rx
            .lock()
            .unwrap()
            .take()
            .expect("the port is already being awaited elsewhere");
        let port = rx.await.expect("the server never reported its port");
        *self.port.lock().unwrap() = Some(port);
        port
    }
}

pub struct PortSaver {
    sender: Mutex<Option<oneshot::Sender<u16>>>,
}

impl PortSaver {
    fn new(sender: oneshot::Sender<u16>) -> PortSaver {
        PortSaver {
            sender: Mutex::new(Some(sender)),
        }
    }
}

#[rocket::async_trait]
impl rocket::fairing::Fairing for PortSaver {
    fn info(&self) -> Info {
        Info {
            name: "Port Saver",
            kind: rocket::fairing::Kind::Liftoff,
        }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        if let Some(sender) = self.sender.lock().unwrap().take() {
            let _ = sender.send(rocket.config().port);
        }
    }
}
