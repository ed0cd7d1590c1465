//! Integration tests for the demo device: boot, edit, reboot.

use std::path::PathBuf;
use std::sync::Arc;

use settings_core::{DiskFileSystem, MemoryFileSystem};
use settings_device::application::device::Device;
use settings_device::domain::light::LightSettings;
use settings_device::domain::mqtt::MqttSettings;
use settings_device::infrastructure::storage::config::StorageConfig;
use uuid::Uuid;

const LIGHT: &str = "/config/lightState.json";
const MQTT: &str = "/config/mqttSettings.json";

fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("settings_device_it_{}", Uuid::new_v4()))
}

#[test]
fn test_settings_survive_reboot_on_disk() {
    // Arrange
    let dir = temp_data_dir();
    let storage = StorageConfig {
        data_dir: dir.clone(),
        ..StorageConfig::default()
    };

    // Act: first boot, change settings, then drop the device
    {
        let device = Device::new(Arc::new(DiskFileSystem::new(dir.clone())), &storage);
        device.boot();
        device.set_led("test", true);
        device.update_mqtt("test", |settings| {
            settings.enabled = true;
            settings.host = "broker.local".to_string();
        });
    }
    let rebooted = Device::new(Arc::new(DiskFileSystem::new(dir.clone())), &storage);
    rebooted.boot();

    // Assert
    assert!(rebooted.light().led_on);
    assert!(rebooted.mqtt().enabled);
    assert_eq!(rebooted.mqtt().host, "broker.local");
    assert!(dir.join("config").join("lightState.json").exists());

    // Cleanup
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_corrupt_file_boots_to_defaults_and_next_change_repairs_it() {
    // Arrange
    let fs = MemoryFileSystem::new();
    fs.insert(MQTT, b"{\"enabled\": tru".to_vec());
    let device = Device::new(Arc::new(fs.clone()), &StorageConfig::default());

    // Act
    device.boot();
    device.update_mqtt("test", |settings| settings.port = 8883);

    // Assert
    let saved: MqttSettings =
        serde_json::from_slice(&fs.contents(MQTT).expect("rewritten")).expect("valid json");
    assert_eq!(
        saved,
        MqttSettings {
            port: 8883,
            ..MqttSettings::default()
        }
    );
}

#[test]
fn test_oversized_file_is_ignored_at_boot() {
    // Arrange: a valid object padded past the 1024-byte capacity
    let fs = MemoryFileSystem::new();
    let mut bytes = br#"{"led_on":true}"#.to_vec();
    bytes.resize(1025, b' ');
    fs.insert(LIGHT, bytes);
    let device = Device::new(Arc::new(fs.clone()), &StorageConfig::default());

    // Act
    device.boot();

    // Assert
    assert_eq!(device.light(), LightSettings::default());
    assert_eq!(fs.write_count(LIGHT), 0, "loading never writes");
}

#[test]
fn test_import_then_reboot_sees_imported_values() {
    // Arrange
    let fs = MemoryFileSystem::new();
    let storage = StorageConfig::default();
    let import = br#"{"light":{"led_on":true},"mqtt":{"client_id":"garage","keep_alive":30}}"#;

    // Act
    {
        let device = Device::new(Arc::new(fs.clone()), &storage);
        device.boot();
        device.import(import).expect("import");
    }
    let rebooted = Device::new(Arc::new(fs.clone()), &storage);
    rebooted.boot();

    // Assert
    assert_eq!(fs.write_count(LIGHT), 1);
    assert_eq!(fs.write_count(MQTT), 1);
    assert!(rebooted.light().led_on);
    assert_eq!(rebooted.mqtt().client_id, "garage");
    assert_eq!(rebooted.mqtt().keep_alive, 30);
    assert_eq!(rebooted.mqtt().host, MqttSettings::default().host);
}

#[test]
fn test_custom_storage_paths_are_used() {
    let fs = MemoryFileSystem::new();
    let storage = StorageConfig {
        light_settings_path: "/cfg/light.json".to_string(),
        ..StorageConfig::default()
    };
    let device = Device::new(Arc::new(fs.clone()), &storage);
    device.boot();

    device.set_led("test", true);

    assert!(fs.exists("/cfg/light.json"));
    assert!(!fs.exists(LIGHT));
}
