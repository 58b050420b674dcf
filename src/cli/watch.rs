//! `watch`: follow cluster changes from the event stream

use crate::api::Connection;
use crate::config::Config;
use crate::stream::{ClusterEvent, ClusterList, StreamSettings, subscribe_clusters_with};
use anyhow::{Context, Result};
use tokio::sync::mpsc;

pub async fn watch(conn: &Connection, config: &Config) -> Result<()> {
    if config.dev_mode {
        println!("Development mode: the cluster stream is disabled");
        return Ok(());
    }

    let initial = conn
        .client
        .try_fetch_clusters()
        .await
        .context("Failed to fetch clusters")?;
    let mut list = ClusterList::new(initial);
    println!("Watching {} clusters (Ctrl-C to stop)", list.len());

    let token = conn.client.headers().authorization().await;
    let settings = StreamSettings::from_config(config, token)?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut guard = subscribe_clusters_with(conn.http.clone(), settings, move |event| {
        let _ = tx.send(event);
    });

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            event = rx.recv() => {
                let Some(event) = event else { break };
                report(&event);
                list.apply(event);
            }
        }
    }

    guard.close();
    println!("Stopped watching ({} clusters)", list.len());
    Ok(())
}

fn report(event: &ClusterEvent) {
    match event {
        ClusterEvent::Added(cluster) => println!("ADDED     {} ({})", cluster.name, cluster.status),
        ClusterEvent::Modified(cluster) => {
            println!("MODIFIED  {} ({})", cluster.name, cluster.status)
        }
        ClusterEvent::Deleted { id } => println!("DELETED   {}", id),
        ClusterEvent::Error(message) => eprintln!("stream error: {}", message),
    }
}
