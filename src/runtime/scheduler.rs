//! Turns `spawn f(args)` into an independent activity: a fresh VM running
//! on its own OS thread, sharing globals, constants, and the builtin table
//! with the activity that spawned it.
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::thread;

use crate::runtime::{closure::Closure, object::Object, vm::VM};

pub fn spawn(
    closure: Arc<Closure>,
    args: Vec<Object>,
    constants: Arc<Vec<Object>>,
    globals: Arc<Mutex<Vec<Object>>>,
    cancelled: Arc<AtomicBool>,
) {
    thread::spawn(move || match VM::for_activity(closure, args, constants, globals, cancelled) {
        Ok(mut vm) => {
            if let Err(err) = vm.run() {
                eprintln!("spawned activity failed: {}", err);
            }
        }
        Err(err) => eprintln!("spawned activity failed: {}", err),
    });
}
