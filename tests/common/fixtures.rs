//! Static telemetry corpora and mapping helpers used across harnesses.

use artemis_core::MappingTable;
use serde_json::{json, Map, Value};
use std::path::PathBuf;

/// One execve event: SYSCALL + EXECVE + CWD + PATH + PROCTITLE sharing one
/// identity. Classified as a process event (exec syscall with PROCTITLE).
pub const AUDIT_EXECVE: &[&str] = &[
    r#"type=SYSCALL msg=audit(1700000000.123:4711): arch=c000003e syscall=59 success=yes exit=0 a0=55d0 a1=55d1 a2=55d2 a3=0 items=2 ppid=1200 pid=1234 auid=1000 uid=1000 gid=1000 euid=1000 suid=1000 fsuid=1000 egid=1000 sgid=1000 fsgid=1000 tty=pts0 ses=3 comm="ls" exe="/usr/bin/ls" key=(null)"#,
    r#"type=EXECVE msg=audit(1700000000.123:4711): argc=2 a0="ls" a1="-la""#,
    r#"type=CWD msg=audit(1700000000.123:4711): cwd="/home/alice""#,
    r#"type=PATH msg=audit(1700000000.123:4711): item=0 name="/usr/bin/ls" inode=1311 dev=08:01 mode=0100755 ouid=0 ogid=0 rdev=00:00 nametype=NORMAL"#,
    "type=PROCTITLE msg=audit(1700000000.123:4711): proctitle=6C73002D6C61",
];

/// One openat on /etc/shadow with a file rule key.
pub const AUDIT_OPENAT: &[&str] = &[
    r#"type=SYSCALL msg=audit(1700000005.500:4712): arch=c000003e syscall=257 success=no exit=-13 ppid=1200 pid=1300 auid=1000 uid=1000 comm="cat" exe="/usr/bin/cat" key="file_access_shadow""#,
    r#"type=CWD msg=audit(1700000005.500:4712): cwd="/tmp""#,
    r#"type=PATH msg=audit(1700000005.500:4712): item=0 name="/etc/shadow" inode=2222 dev=08:01 mode=0100640 ouid=0 ogid=42 nametype=NORMAL"#,
];

/// One outbound connect with a SOCKADDR record.
pub const AUDIT_CONNECT: &[&str] = &[
    r#"type=SYSCALL msg=audit(1700000010.000:4713): arch=c000003e syscall=42 success=yes exit=0 ppid=1 pid=880 auid=4294967295 uid=0 comm="curl" exe="/usr/bin/curl" key=(null)"#,
    "type=SOCKADDR msg=audit(1700000010.000:4713): saddr=020001BB5DB8D8220000000000000000",
];

/// A userspace login record with the single-quoted message envelope.
pub const AUDIT_USER_LOGIN: &[&str] = &[
    r#"type=USER_LOGIN msg=audit(1700000020.250:4714): pid=990 uid=0 auid=1000 ses=4 msg='op=login id=1000 exe="/usr/sbin/sshd" hostname=10.0.0.5 addr=10.0.0.5 terminal=/dev/pts/1 res=success'"#,
];

/// Every corpus above concatenated, with noise: a leading orphan line, blank
/// lines and a repeated header for the first event.
pub fn audit_log() -> Vec<String> {
    let mut lines = vec!["garbage before any header".to_string(), String::new()];
    lines.extend(AUDIT_EXECVE.iter().map(|s| s.to_string()));
    lines.push("type=EOE msg=audit(1700000000.123:4711): ".to_string());
    for corpus in [AUDIT_OPENAT, AUDIT_CONNECT, AUDIT_USER_LOGIN] {
        lines.push(String::new());
        lines.extend(corpus.iter().map(|s| s.to_string()));
    }
    lines
}

/// A Sysmon process-create record in flat form.
pub fn sysmon_process_create() -> Map<String, Value> {
    object(json!({
        "EventID": "1",
        "Computer": "WS-01.corp.local",
        "TimeCreated@SystemTime": "2024-01-15T10:00:00.1234567Z",
        "RuleName": "-",
        "UtcTime": "2024-01-15 10:00:00.123",
        "ProcessGuid": "{a1b2c3d4-0000-0000-0000-000000000001}",
        "ProcessId": "4242",
        "Image": "C:\\Windows\\System32\\cmd.exe",
        "CommandLine": "cmd.exe /c whoami",
        "CurrentDirectory": "C:\\Users\\alice\\",
        "User": "CORP\\alice",
        "TerminalSessionId": "1",
        "IntegrityLevel": "Medium",
        "Hashes": "SHA1=AB12,MD5=CD34,SHA256=EF56",
        "ParentProcessId": "4000",
        "ParentImage": "C:\\Windows\\explorer.exe"
    }))
}

/// A Sysmon network-connect record in flat form.
pub fn sysmon_network_connect() -> Map<String, Value> {
    object(json!({
        "EventID": "3",
        "Computer": "WS-01.corp.local",
        "TimeCreated@SystemTime": "2024-01-15T10:00:01.0000000Z",
        "ProcessId": "4242",
        "Image": "C:\\Windows\\System32\\curl.exe",
        "Protocol": "TCP",
        "Initiated": "true",
        "SourceIp": "10.0.0.7",
        "SourcePort": "50123",
        "DestinationIp": "93.184.216.34",
        "DestinationPort": "443"
    }))
}

/// A DNS query record (Event ID 22), which has no entry in the shipped table.
pub fn sysmon_dns_query() -> Map<String, Value> {
    object(json!({
        "EventID": "22",
        "Computer": "WS-01.corp.local",
        "TimeCreated@SystemTime": "2024-01-15T10:00:02.0000000Z",
        "QueryName": "example.com",
        "ProcessId": "4242"
    }))
}

pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture is not a JSON object: {other}"),
    }
}

/// Path of a mapping file shipped in `mappings/`.
pub fn shipped_mapping(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("mappings").join(name)
}

pub fn linux_table() -> MappingTable {
    MappingTable::from_path(shipped_mapping("standardization_map_lin.json"))
        .expect("shipped linux mapping must load")
}

pub fn windows_table() -> MappingTable {
    MappingTable::from_path(shipped_mapping("standardization_map_win.json"))
        .expect("shipped windows mapping must load")
}
