//! WalletSession - connection state over an injected wallet provider

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::flow::notice::{Notice, Notices};

#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn is_connected(&self) -> anyhow::Result<bool>;
    async fn get_address(&self) -> anyhow::Result<String>;
    async fn connect(&self) -> anyhow::Result<()>;
    async fn disconnect(&self) -> anyhow::Result<()>;
}

/// In-process provider with a fixed address.
#[derive(Debug)]
pub struct StaticWallet {
    address: String,
    connected: AtomicBool,
}

impl StaticWallet {
    pub fn new(address: impl Into<String>) -> Self {
        Self { address: address.into(), connected: Default::default() }
    }

    pub fn connected(address: impl Into<String>) -> Self {
        let w = Self::new(address);
        w.connected.store(true, Ordering::SeqCst);
        w
    }
}

#[async_trait]
impl WalletProvider for StaticWallet {
    async fn is_connected(&self) -> anyhow::Result<bool> { Ok(self.connected.load(Ordering::SeqCst)) }

    async fn get_address(&self) -> anyhow::Result<String> {
        if !self.is_connected().await? {
            anyhow::bail!("wallet not connected");
        }
        Ok(self.address.clone())
    }

    async fn connect(&self) -> anyhow::Result<()> {
        if self.address.is_empty() {
            anyhow::bail!("wallet has no address");
        }
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> anyhow::Result<()> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// `provider: None` models a browser without the wallet extension.
pub struct WalletSession<P: WalletProvider> {
    provider: Option<P>,
    connected: bool,
    connecting: bool,
    address: String,
    pub notices: Notices,
}

impl<P: WalletProvider> WalletSession<P> {
    pub fn new(provider: Option<P>) -> Self {
        Self { provider, connected: false, connecting: false, address: String::new(), notices: Notices::default() }
    }

    pub fn is_installed(&self) -> bool { self.provider.is_some() }
    pub fn is_connected(&self) -> bool { self.connected }
    pub fn is_connecting(&self) -> bool { self.connecting }

    pub fn address(&self) -> Option<&str> {
        if self.connected { Some(&self.address) } else { None }
    }

    /// Pick up a connection made before this session existed.
    pub async fn restore(&mut self) -> bool {
        let Some(provider) = self.provider.as_ref() else { return false };
        let restored = match provider.is_connected().await {
            Ok(true) => provider.get_address().await.ok(),
            Ok(false) => None,
            Err(e) => {
                tracing::warn!("wallet status check failed: {}", e);
                None
            }
        };
        match restored {
            Some(address) => { self.address = address; self.connected = true; true }
            None => { self.address.clear(); self.connected = false; false }
        }
    }

    pub async fn connect(&mut self) -> bool {
        let Some(provider) = self.provider.as_ref() else {
            self.notices.push(Notice::error("Wallet Not Installed", "Please install the Yours wallet extension to continue."));
            return false;
        };
        self.connecting = true;
        let result: anyhow::Result<String> = async {
            provider.connect().await?;
            provider.get_address().await
        }.await;
        self.connecting = false;

        match result {
            Ok(address) => {
                self.address = address;
                self.connected = true;
                self.notices.push(Notice::info("Wallet Connected", "Your wallet has been connected successfully."));
                true
            }
            Err(e) => {
                tracing::warn!("wallet connect failed: {}", e);
                self.notices.push(Notice::error("Connection Error", "Failed to connect to your wallet. Please try again."));
                false
            }
        }
    }

    pub async fn disconnect(&mut self) {
        if let Some(provider) = self.provider.as_ref() {
            if let Err(e) = provider.disconnect().await {
                tracing::warn!("wallet disconnect failed: {}", e);
                self.notices.push(Notice::error("Disconnect Error", "Failed to disconnect your wallet."));
                return;
            }
        }
        self.address.clear();
        self.connected = false;
        self.notices.push(Notice::info("Wallet Disconnected", "Your wallet has been disconnected."));
    }
}
