use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::io::Lines;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

use gamecord::adapter::{Bot, BotConfig, Gateway, GatewayConfig, PacingPolicy};
use gamecord::core::{Game, Wander};

async fn send_line(write_half: &mut OwnedWriteHalf, line: &str) {
    write_half.write_all(line.as_bytes()).await.unwrap();
    write_half.write_all(b"\n").await.unwrap();
    write_half.flush().await.unwrap();
}

/// Next frame, skipping presence updates which may arrive at any point.
async fn next_frame(lines: &mut Lines<BufReader<OwnedReadHalf>>) -> serde_json::Value {
    loop {
        let line = tokio::time::timeout(Duration::from_secs(2), lines.next_line())
            .await
            .expect("timed out waiting for a frame")
            .unwrap()
            .expect("connection closed");
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        if v["type"] != "presence" {
            return v;
        }
        assert_eq!(v["activity"], "!wander");
    }
}

#[tokio::test]
async fn gateway_trigger_posts_game_and_attaches_controls() {
    let config = BotConfig {
        gateway: GatewayConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            protocol_version: "1.0.0".to_string(),
            max_pending_events: 8,
        },
        ..BotConfig::new("wander", "!").with_pacing(PacingPolicy::none())
    };

    let gateway = tokio::time::timeout(Duration::from_secs(2), Gateway::start(config.gateway.clone()))
        .await
        .expect("gateway did not start")
        .expect("gateway failed to bind");
    let addr = gateway.addr;

    let game = Wander::new(1);
    let controls: Vec<String> = game.controls().iter().map(|s| s.to_string()).collect();
    let bot = Bot::new(game, Arc::new(gateway.transport), config);
    let bot_handle = tokio::spawn(bot.run(gateway.events));

    let stream = TcpStream::connect(addr).await.expect("connect failed");
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    let welcome = next_frame(&mut lines).await;
    assert_eq!(welcome["type"], "welcome");
    assert_eq!(welcome["version"], "1.0.0");

    // Garbage gets an error frame and the connection stays usable.
    send_line(&mut write_half, "not json").await;
    let frame = next_frame(&mut lines).await;
    assert_eq!(frame["type"], "error");
    assert_eq!(frame["code"], "invalid_frame");

    send_line(
        &mut write_half,
        r#"{"type":"messageCreate","channel":5,"author":7,"content":"!wander"}"#,
    )
    .await;

    let frame = next_frame(&mut lines).await;
    assert_eq!(frame["type"], "messageCreate");
    assert_eq!(frame["channel"], 5);
    let id = frame["id"].as_u64().expect("message id");
    assert!(frame["content"].as_str().unwrap().contains('\n'));

    for emoji in &controls {
        let frame = next_frame(&mut lines).await;
        assert_eq!(frame["type"], "reactionAdd");
        assert_eq!(frame["message"], id);
        assert_eq!(frame["emoji"], emoji.as_str());
    }

    let frame = next_frame(&mut lines).await;
    assert_eq!(frame["type"], "messageUpdate");
    assert_eq!(frame["id"], id);

    bot_handle.abort();
    gateway.task.abort();
}
