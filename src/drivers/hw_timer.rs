//! Hardware timer module using ESP-IDF's esp_timer API.
//!
//! Two periodic timers drive the asynchronous producers:
//!
//! - 100 ms sampling tick ([`SamplingTask`])
//! - 10 ms UART receive pump ([`ReceiveTask`]), standing in for the RX
//!   interrupt
//!
//! Timer callbacks execute in the ESP timer task context (not ISR), one at
//! a time, so each task context is only ever borrowed by its own callback.
//! On simulation targets nothing is scheduled; tests call the task bodies
//! directly.

use crate::app::ports::{SensorPort, Transport};
use crate::error::Error;
use crate::sampler::SamplingTask;
use crate::serial::line::ReceiveTask;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

/// Body of a periodic timer callback. Must not block.
pub trait PeriodicTask {
    fn run(&mut self);
}

impl<A: SensorPort> PeriodicTask for SamplingTask<A> {
    fn run(&mut self) {
        self.tick();
    }
}

impl<T: Transport> PeriodicTask for ReceiveTask<'static, T> {
    fn run(&mut self) {
        self.pump();
    }
}

/// A started periodic timer. Stopped and deleted when dropped, so the
/// owner must keep it alive for as long as the task should run.
pub struct PeriodicTimer {
    #[cfg(target_os = "espidf")]
    handle: esp_timer_handle_t,
    name: &'static str,
}

impl Drop for PeriodicTimer {
    fn drop(&mut self) {
        #[cfg(target_os = "espidf")]
        // SAFETY: handle came from a successful esp_timer_create and is
        // deleted exactly once, here.
        unsafe {
            esp_timer_stop(self.handle);
            esp_timer_delete(self.handle);
        }
        log::info!("hw_timer: {} stopped", self.name);
    }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn trampoline<T: PeriodicTask>(arg: *mut core::ffi::c_void) {
    // SAFETY: arg is the `&'static mut T` handed to `start_periodic`; the
    // esp_timer task runs callbacks sequentially, so this is the only
    // live reference.
    let task = unsafe { &mut *arg.cast::<T>() };
    task.run();
}

/// Create and start a periodic timer running `task` every `period_ms`.
#[cfg(target_os = "espidf")]
pub fn start_periodic<T: PeriodicTask>(
    name: &'static core::ffi::CStr,
    period_ms: u32,
    task: &'static mut T,
) -> Result<PeriodicTimer, Error> {
    let args = esp_timer_create_args_t {
        callback: Some(trampoline::<T>),
        arg: (task as *mut T).cast(),
        dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
        name: name.as_ptr(),
        skip_unhandled_events: true,
    };

    let mut handle: esp_timer_handle_t = core::ptr::null_mut();
    // SAFETY: args outlives the call; the task pointer is 'static.
    let ret = unsafe { esp_timer_create(&args, &mut handle) };
    if ret != ESP_OK as i32 {
        return Err(Error::Timer(ret));
    }
    // Deletes the timer again if starting it fails.
    let timer = PeriodicTimer {
        handle,
        name: name.to_str().unwrap_or("timer"),
    };

    // SAFETY: handle is valid after a successful create.
    let ret = unsafe { esp_timer_start_periodic(handle, u64::from(period_ms) * 1_000) };
    if ret != ESP_OK as i32 {
        return Err(Error::Timer(ret));
    }

    info!("hw_timer: {} every {} ms", timer.name, period_ms);
    Ok(timer)
}

#[cfg(not(target_os = "espidf"))]
pub fn start_periodic<T: PeriodicTask>(
    name: &'static core::ffi::CStr,
    period_ms: u32,
    _task: &'static mut T,
) -> Result<PeriodicTimer, Error> {
    let name = name.to_str().unwrap_or("timer");
    log::info!("hw_timer(sim): {} ({} ms) not scheduled", name, period_ms);
    Ok(PeriodicTimer { name })
}
