use bytes::Bytes;
use hermes::wire::{
    ConnectAck, ConnectReturnCode, Disconnect, MessageType, PingResponse, ProtocolError,
    PublishRelease,
};
use hermes::{build_pipeline, FormatterError, HermesConfig};

#[tokio::test]
async fn test_bundled_formatters_registered() {
    let pipeline = build_pipeline(&HermesConfig::default()).unwrap();

    assert_eq!(
        pipeline.manager.message_types(),
        vec![
            MessageType::ConnectAck,
            MessageType::PublishAck,
            MessageType::PublishReceived,
            MessageType::PublishRelease,
            MessageType::PublishComplete,
            MessageType::UnsubscribeAck,
            MessageType::PingRequest,
            MessageType::PingResponse,
            MessageType::Disconnect,
        ]
    );
}

#[tokio::test]
async fn test_packets_in_messages_out() {
    let mut pipeline = build_pipeline(&HermesConfig::default()).unwrap();

    pipeline
        .manager
        .manage_packet(&[0x20, 0x02, 0x01, 0x00])
        .await
        .unwrap();
    pipeline
        .manager
        .manage_packet(&[0x62, 0x02, 0x12, 0x34])
        .await
        .unwrap();
    pipeline.manager.manage_packet(&[0xE0, 0x00]).await.unwrap();

    let connect_ack = pipeline.messages.recv().await.unwrap();
    assert_eq!(
        connect_ack.downcast_ref::<ConnectAck>(),
        Some(&ConnectAck::new(ConnectReturnCode::Accepted, true))
    );
    let release = pipeline.messages.recv().await.unwrap();
    assert_eq!(
        release.downcast_ref::<PublishRelease>(),
        Some(&PublishRelease::new(0x1234))
    );
    let disconnect = pipeline.messages.recv().await.unwrap();
    assert_eq!(disconnect.downcast_ref::<Disconnect>(), Some(&Disconnect));
}

#[tokio::test]
async fn test_messages_in_packets_out() {
    let mut pipeline = build_pipeline(&HermesConfig::default()).unwrap();

    pipeline
        .manager
        .manage_message(Box::new(PingResponse))
        .await
        .unwrap();
    pipeline
        .manager
        .manage_message(Box::new(PublishRelease::new(1)))
        .await
        .unwrap();

    assert_eq!(
        pipeline.packets.recv().await.unwrap(),
        Bytes::from_static(&[0xD0, 0x00])
    );
    assert_eq!(
        pipeline.packets.recv().await.unwrap(),
        Bytes::from_static(&[0x62, 0x02, 0x00, 0x01])
    );
}

#[tokio::test]
async fn test_rejections_send_nothing() {
    let mut pipeline = build_pipeline(&HermesConfig::default()).unwrap();

    // CONNECT has no bundled codec
    assert_eq!(
        pipeline.manager.manage_packet(&[0x10, 0x00]).await,
        Err(FormatterError::Protocol(
            ProtocolError::UnsupportedMessageType(MessageType::Connect)
        ))
    );
    assert!(matches!(
        pipeline.manager.manage_packet(&[0x48, 0x02, 0x00, 0x01]).await,
        Err(FormatterError::Protocol(ProtocolError::InvalidHeaderFlag { .. }))
    ));
    assert_eq!(
        pipeline.manager.manage_packet(&[]).await,
        Err(FormatterError::Protocol(ProtocolError::EmptyPacket))
    );

    assert!(pipeline.messages.try_recv().is_err());
    assert!(pipeline.packets.try_recv().is_err());
}

#[tokio::test]
async fn test_closed_receivers_surface_channel_error() {
    let pipeline = build_pipeline(&HermesConfig::default()).unwrap();
    let manager = pipeline.manager;
    drop(pipeline.messages);
    drop(pipeline.packets);

    assert!(matches!(
        manager.manage_packet(&[0xC0, 0x00]).await,
        Err(FormatterError::Channel(_))
    ));
    assert!(matches!(
        manager.manage_message(Box::new(PingResponse)).await,
        Err(FormatterError::Channel(_))
    ));
}

#[test]
fn test_zero_capacity_is_an_error() {
    let inbound = HermesConfig {
        inbound_capacity: 0,
        ..HermesConfig::default()
    };
    let err = build_pipeline(&inbound).err().unwrap();
    assert!(err.to_string().contains("inbound_capacity"));

    let outbound = HermesConfig {
        outbound_capacity: 0,
        ..HermesConfig::default()
    };
    let err = build_pipeline(&outbound).err().unwrap();
    assert!(err.to_string().contains("outbound_capacity"));
}
