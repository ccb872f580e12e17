mod common;
use common::*;

use std::collections::HashMap;

use pnet::packet::ethernet::EthernetPacket;
use pnet::packet::ipv4::Ipv4Packet;
use pnet::packet::vlan::VlanPacket;
use pnet::packet::Packet;
use pnet::util::MacAddr;

use mefsw::action::{Action, TagKind};
use mefsw::service::ServiceRule;
use mefsw::{build_key, process_frame, ClassificationKey, Disposition, Pipeline, Rule};
use mefsw::{Buf, CursorMut, FrameBuf, SharedRuleTable};

const UNTAGGED: &str = "Ipv4UdpUntagged.dat";
const VLAN100: &str = "Ipv4UdpVlan100.dat";
const QINQ: &str = "Ipv4UdpQinQ30In10.dat";

fn single_rule(key: ClassificationKey, actions: &[Action]) -> HashMap<ClassificationKey, Rule> {
    let mut table = HashMap::new();
    table.insert(key, Rule::from_actions(actions).unwrap());
    table
}

fn assert_ipv4_intact(payload: &[u8]) {
    let ip = Ipv4Packet::new(payload).unwrap();
    assert_eq!(ip.get_source(), std::net::Ipv4Addr::new(192, 168, 29, 58));
    assert_eq!(ip.get_destination(), std::net::Ipv4Addr::new(192, 168, 29, 160));
    assert_eq!(ip.get_identification(), 0x5c65);
}

#[test]
fn classification_precedence() {
    let packet = file_to_packet(UNTAGGED);
    assert_eq!(build_key(&packet, 4), Ok(ClassificationKey::new(4, 0, 0)));

    let packet = file_to_packet(VLAN100);
    assert_eq!(build_key(&packet, 4), Ok(ClassificationKey::new(4, 100, 0)));

    let packet = file_to_packet(QINQ);
    assert_eq!(build_key(&packet, 4), Ok(ClassificationKey::new(4, 30, 10)));
}

#[test]
fn rule_miss_passes_unchanged() {
    let table = single_rule(
        ClassificationKey::new(5, 100, 0),
        &[Action::push_svlan(200), Action::Forward { target_port: 7 }],
    );

    for (fname, port) in [(UNTAGGED, 5), (VLAN100, 6), (QINQ, 5)] {
        let packet = file_to_packet(fname);
        let mut frame = file_to_frame(fname);
        assert_eq!(process_frame(&mut frame, port, &table), Disposition::Pass);
        assert_eq!(frame.data(), &packet[..]);
    }
}

#[test]
fn short_frames_pass() {
    let table = single_rule(ClassificationKey::new(1, 0, 0), &[Action::Pop]);
    let packet = file_to_packet(UNTAGGED);

    for len in 0..14 {
        let mut bytes = packet[..len].to_vec();
        let mut frame = CursorMut::new(&mut bytes[..]);
        assert_eq!(process_frame(&mut frame, 1, &table), Disposition::Pass);
        assert_eq!(frame.chunk(), &packet[..len]);
    }

    // a customer tag cut in half cannot be classified either
    let packet = file_to_packet(VLAN100);
    let table = single_rule(ClassificationKey::new(1, 100, 0), &[Action::Pop]);
    let mut frame = FrameBuf::from_slice(16, &packet[..16]);
    assert_eq!(process_frame(&mut frame, 1, &table), Disposition::Pass);
    assert_eq!(frame.data(), &packet[..16]);
}

#[test]
fn push_svlan_and_redirect() {
    let table = single_rule(
        ClassificationKey::new(5, 100, 0),
        &[Action::push_svlan(200), Action::Forward { target_port: 7 }],
    );
    let packet = file_to_packet(VLAN100);
    let mut frame = file_to_frame(VLAN100);

    assert_eq!(process_frame(&mut frame, 5, &table), Disposition::Redirect(7));
    assert_eq!(frame.len(), packet.len() + 4);

    let eth = EthernetPacket::new(frame.data()).unwrap();
    assert_eq!(eth.get_destination(), MacAddr::new(0x00, 0x0b, 0x86, 0x64, 0x8b, 0xa0));
    assert_eq!(eth.get_source(), MacAddr::new(0x00, 0x50, 0x56, 0xae, 0x76, 0xf5));
    assert_eq!(eth.get_ethertype().0, 0x88a8);

    let outer = VlanPacket::new(eth.payload()).unwrap();
    assert_eq!(outer.get_vlan_identifier(), 200);
    assert_eq!(outer.get_ethertype().0, 0x8100);

    let inner = VlanPacket::new(outer.payload()).unwrap();
    assert_eq!(inner.get_vlan_identifier(), 100);
    assert_eq!(inner.get_ethertype().0, 0x0800);
    assert_ipv4_intact(inner.payload());

    // the rewritten frame now classifies as QinQ
    assert_eq!(
        build_key(frame.data(), 7),
        Ok(ClassificationKey::new(7, 200, 100))
    );
}

#[test]
fn push_then_pop_round_trip() {
    for fname in [UNTAGGED, VLAN100, QINQ] {
        let packet = file_to_packet(fname);
        let key = build_key(&packet, 2).unwrap();
        let table = single_rule(key, &[Action::push_cvlan(0x0abc), Action::Pop]);

        let mut frame = file_to_frame(fname);
        assert_eq!(process_frame(&mut frame, 2, &table), Disposition::Pass);
        assert_eq!(frame.data(), &packet[..]);
    }
}

#[test]
fn pop_untagged_is_noop() {
    let table = single_rule(
        ClassificationKey::new(3, 0, 0),
        &[Action::Pop, Action::Forward { target_port: 11 }],
    );
    let packet = file_to_packet(UNTAGGED);
    let mut frame = file_to_frame(UNTAGGED);

    assert_eq!(process_frame(&mut frame, 3, &table), Disposition::Redirect(11));
    assert_eq!(frame.data(), &packet[..]);
}

#[test]
fn pop_unwinds_qinq_one_tag_at_a_time() {
    let key = ClassificationKey::new(1, 30, 10);
    let untagged = file_to_packet(UNTAGGED);

    let table = single_rule(key, &[Action::Pop, Action::Forward { target_port: 2 }]);
    let mut frame = file_to_frame(QINQ);
    assert_eq!(process_frame(&mut frame, 1, &table), Disposition::Redirect(2));
    let eth = EthernetPacket::new(frame.data()).unwrap();
    assert_eq!(eth.get_ethertype().0, 0x8100);
    let tag = VlanPacket::new(eth.payload()).unwrap();
    assert_eq!(tag.get_vlan_identifier(), 10);

    let table = single_rule(key, &[Action::Pop, Action::Pop]);
    let mut frame = file_to_frame(QINQ);
    assert_eq!(process_frame(&mut frame, 1, &table), Disposition::Pass);
    assert_eq!(frame.data(), &untagged[..]);
    let eth = EthernetPacket::new(frame.data()).unwrap();
    assert_ipv4_intact(eth.payload());
}

#[test]
fn forward_to_port_zero_passes_unchanged() {
    let table = single_rule(
        ClassificationKey::new(5, 100, 0),
        &[Action::Forward { target_port: 0 }],
    );
    let packet = file_to_packet(VLAN100);
    let mut frame = file_to_frame(VLAN100);
    assert_eq!(process_frame(&mut frame, 5, &table), Disposition::Pass);
    assert_eq!(frame.data(), &packet[..]);
}

#[test]
fn empty_rule_passes_unchanged() {
    let table = single_rule(ClassificationKey::new(5, 100, 0), &[]);
    let packet = file_to_packet(VLAN100);
    let mut frame = file_to_frame(VLAN100);
    assert_eq!(process_frame(&mut frame, 5, &table), Disposition::Pass);
    assert_eq!(frame.data(), &packet[..]);
}

#[test]
fn unknown_tag_kind_aborts_without_rewriting() {
    let table = single_rule(
        ClassificationKey::new(5, 100, 0),
        &[
            Action::Push {
                tag_kind: TagKind::from(3),
                vlan_id: 200,
            },
            Action::Forward { target_port: 7 },
        ],
    );
    let packet = file_to_packet(VLAN100);
    let mut frame = file_to_frame(VLAN100);
    assert_eq!(process_frame(&mut frame, 5, &table), Disposition::Abort);
    assert_eq!(frame.data(), &packet[..]);
}

#[test]
fn in_place_over_driver_buffer() {
    let packet = file_to_packet(UNTAGGED);
    let headroom = 64;
    let mut rx = vec![0u8; headroom + packet.len()];
    rx[headroom..].copy_from_slice(&packet[..]);

    let table = single_rule(
        ClassificationKey::new(1, 0, 0),
        &[
            Action::push_cvlan(10),
            Action::push_svlan(30),
            Action::Forward { target_port: 4 },
        ],
    );

    let end = rx.len();
    let mut frame = CursorMut::with_region(&mut rx[..], headroom, end).unwrap();
    assert_eq!(process_frame(&mut frame, 1, &table), Disposition::Redirect(4));
    assert_eq!(frame.cursor(), headroom - 8);
    assert_eq!(
        build_key(frame.chunk(), 1),
        Ok(ClassificationKey::new(1, 30, 10))
    );
    let start = frame.cursor();

    // same layout as the provisioned QinQ frame, minus the priority bits
    let mut expected = file_to_packet(QINQ);
    expected[14] &= 0x0f;
    expected[18] &= 0x0f;
    assert_eq!(&rx[start..], &expected[..]);
}

#[test]
fn provisioned_services() {
    init_tracing();

    let table = SharedRuleTable::new();
    ServiceRule {
        match_outer: Some(100),
        push_svlan: Some(200),
        egress_port: Some(7),
        ..ServiceRule::new(5)
    }
    .install(&table)
    .unwrap();
    ServiceRule {
        match_outer: Some(30),
        match_inner: Some(10),
        pop_tags: 2,
        egress_port: Some(9),
        ..ServiceRule::new(5)
    }
    .install(&table)
    .unwrap();

    let pipeline = Pipeline::new(&table);

    let mut frame = file_to_frame(QINQ);
    assert_eq!(pipeline.process(&mut frame, 5), Disposition::Redirect(9));
    assert_eq!(frame.data(), &file_to_packet(UNTAGGED)[..]);

    let mut frame = file_to_frame(VLAN100);
    assert_eq!(pipeline.process(&mut frame, 5), Disposition::Redirect(7));
    assert_eq!(build_key(frame.data(), 5), Ok(ClassificationKey::new(5, 200, 100)));

    let mut frame = file_to_frame(UNTAGGED);
    assert!(pipeline.process(&mut frame, 5).is_pass());

    // rules provisioned in their packed form behave the same
    let key = ClassificationKey::new(6, 0, 0);
    let rule = Rule::from_actions(&[Action::push_cvlan(100), Action::Forward { target_port: 1 }])
        .unwrap();
    table.insert_raw(&key.to_bytes(), &rule.encode()).unwrap();

    let mut frame = file_to_frame(UNTAGGED);
    assert_eq!(pipeline.process(&mut frame, 6), Disposition::Redirect(1));
    assert_eq!(frame.data(), &file_to_packet(VLAN100)[..]);
}

#[test]
fn packed_qinq_key_matches_qinq_frame() {
    // port 5, customer id 10 in bytes 4..6, service id 30 in bytes 6..8
    let mut raw_key = [0u8; ClassificationKey::WIRE_LEN];
    raw_key[0] = 5;
    raw_key[4] = 10;
    raw_key[6] = 30;
    let rule = Rule::from_actions(&[Action::Pop, Action::Forward { target_port: 3 }]).unwrap();

    let table = SharedRuleTable::new();
    table.insert_raw(&raw_key, &rule.encode()).unwrap();
    assert_eq!(table.get(&ClassificationKey::new(5, 30, 10)), Some(rule));

    let mut frame = file_to_frame(QINQ);
    assert_eq!(process_frame(&mut frame, 5, &table), Disposition::Redirect(3));
    let eth = EthernetPacket::new(frame.data()).unwrap();
    assert_eq!(eth.get_ethertype().0, 0x8100);
    assert_eq!(VlanPacket::new(eth.payload()).unwrap().get_vlan_identifier(), 10);
}
