#![allow(dead_code)]
use std::fs;
use std::path::{Path, PathBuf};

/// Two service events, exported with the usual Event Viewer namespace.
pub const SYSTEM_SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8" standalone="yes"?>
<Events>
  <Event xmlns="http://schemas.microsoft.com/win/2004/08/events/event">
    <System>
      <Provider Name="Service Control Manager" Guid="{555908d1-a6d7-4695-8e1e-26931d2012f4}"/>
      <EventID>7036</EventID>
      <Level>4</Level>
      <Task>0</Task>
      <Keywords>0x8080000000000000</Keywords>
      <TimeCreated SystemTime="2025-11-09T10:15:30.123456Z"/>
      <RecordId>152063</RecordId>
      <Computer>DESKTOP-0QT8017</Computer>
    </System>
    <EventData>
      <Data Name="param1">Windows Update</Data>
      <Data Name="param2">running</Data>
    </EventData>
  </Event>
  <Event xmlns="http://schemas.microsoft.com/win/2004/08/events/event">
    <System>
      <Provider Name="Service Control Manager" Guid="{555908d1-a6d7-4695-8e1e-26931d2012f4}"/>
      <EventID>7040</EventID>
      <Level>4</Level>
      <Task>0</Task>
      <Keywords>0x8080000000000000</Keywords>
      <TimeCreated SystemTime="2025-11-09T10:16:02.000000Z"/>
      <RecordId>152064</RecordId>
      <Computer>DESKTOP-0QT8017</Computer>
    </System>
    <EventData>
      <Data Name="param1">Background Intelligent Transfer Service</Data>
      <Data Name="param2">auto start</Data>
      <Data Name="param3">demand start</Data>
    </EventData>
  </Event>
</Events>
"#;

/// One installer event, with a rendered message.
pub const APPLICATION_SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8" standalone="yes"?>
<Events>
  <Event xmlns="http://schemas.microsoft.com/win/2004/08/events/event">
    <System>
      <Provider Name="MsiInstaller"/>
      <EventID>1033</EventID>
      <Level>4</Level>
      <Task>0</Task>
      <Keywords>0x80000000000000</Keywords>
      <TimeCreated SystemTime="2025-11-09T11:02:11.950Z"/>
      <RecordId>90211</RecordId>
      <Computer>DESKTOP-0QT8017</Computer>
    </System>
    <EventData>
      <Data>Product X</Data>
      <Data>1.4.2</Data>
    </EventData>
    <RenderingInfo Culture="en-US">
      <Message>Windows Installer installed the product.</Message>
    </RenderingInfo>
  </Event>
</Events>
"#;

/// Truncated mid-event; fails to parse after zero complete events.
pub const MALFORMED_SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Events>
  <Event>
    <System>
      <EventID>1</Event
"#;

pub fn write_sample(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}
