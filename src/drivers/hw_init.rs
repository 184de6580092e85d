//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC1 oneshot unit, the actuator GPIOs and the host UART
//! using raw ESP-IDF sys calls. Called once from `main()` before the
//! timers start.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use crate::error::SerialError;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    UartInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc)    => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::UartInitFailed(rc)   => write!(f, "UART driver install failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

pub const ADC1_CH_LIGHT: u32 = crate::pins::LIGHT_ADC1_CHANNEL;
pub const ADC1_CH_TEMP: u32 = crate::pins::TEMP_ADC1_CHANNEL;
pub const ADC1_CH_MOISTURE: u32 = crate::pins::MOISTURE_ADC1_CHANNEL;

#[cfg(target_os = "espidf")]
pub fn init_peripherals(uart_baud: u32) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before any timer starts; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_outputs()?;
        init_uart(uart_baud)?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(_uart_baud: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the init path or the sampling tick.
/// `init_adc()` completes before the sampling timer is started, and the
/// tick is the only reader afterwards.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [ADC1_CH_LIGHT, ADC1_CH_TEMP, ADC1_CH_MOISTURE] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }
    }

    info!(
        "hw_init: ADC1 configured (CH{}=light, CH{}=temp, CH{}=moisture)",
        ADC1_CH_LIGHT, ADC1_CH_TEMP, ADC1_CH_MOISTURE
    );
    Ok(())
}

/// One 12-bit conversion. A failed read yields 0 (a flat value, not an error).
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract; the sampling tick is the only caller.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.clamp(0, 4095) as u16
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [pins::FAN_GPIO, pins::PUMP_GPIO, pins::GROW_LIGHT_GPIO];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        // All actuators start off.
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured (fan, pump, grow light), all LOW");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe { gpio_set_level(pin, if high { 1 } else { 0 }); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── UART (host link) ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_uart(baud: u32) -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: baud as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };

    let ret = unsafe { uart_param_config(pins::UART_PORT, &cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

    let ret = unsafe {
        uart_set_pin(
            pins::UART_PORT,
            pins::UART_TX_GPIO,
            pins::UART_RX_GPIO,
            UART_PIN_NO_CHANGE,
            UART_PIN_NO_CHANGE,
        )
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

    // No TX ring buffer: writes block until the frame is in the FIFO.
    let ret = unsafe {
        uart_driver_install(
            pins::UART_PORT,
            pins::UART_RX_BUFFER,
            0,
            0,
            core::ptr::null_mut(),
            0,
        )
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }

    info!("hw_init: UART{} at {} baud 8N1", pins::UART_PORT, baud);
    Ok(())
}

/// Bytes waiting in the driver's RX ring buffer.
#[cfg(target_os = "espidf")]
pub fn uart_buffered() -> usize {
    let mut len: usize = 0;
    // SAFETY: driver installed in init_uart(); read-only query.
    let ret = unsafe { uart_get_buffered_data_len(pins::UART_PORT, &mut len) };
    if ret != ESP_OK as i32 { 0 } else { len }
}

/// Non-blocking read of whatever is buffered, up to `buf.len()` bytes.
#[cfg(target_os = "espidf")]
pub fn uart_read(buf: &mut [u8]) -> Result<usize, SerialError> {
    // SAFETY: buf is valid for buf.len() bytes; zero ticks never blocks.
    let n = unsafe {
        uart_read_bytes(pins::UART_PORT, buf.as_mut_ptr().cast(), buf.len() as u32, 0)
    };
    if n < 0 { Err(SerialError::ReadFailed(n)) } else { Ok(n as usize) }
}

#[cfg(target_os = "espidf")]
pub fn uart_write(data: &[u8]) -> Result<usize, SerialError> {
    // SAFETY: data is valid for data.len() bytes; the driver copies it.
    let n = unsafe { uart_write_bytes(pins::UART_PORT, data.as_ptr().cast(), data.len()) };
    if n < 0 { Err(SerialError::WriteFailed(n)) } else { Ok(n as usize) }
}

#[cfg(target_os = "espidf")]
pub fn uart_wait_tx_done(timeout_ms: u32) -> Result<(), SerialError> {
    let ticks = timeout_ms.saturating_mul(configTICK_RATE_HZ) / 1000;
    // SAFETY: driver installed in init_uart().
    let ret = unsafe { esp_idf_svc::sys::uart_wait_tx_done(pins::UART_PORT, ticks) };
    if ret != ESP_OK as i32 { Err(SerialError::FlushTimeout) } else { Ok(()) }
}
