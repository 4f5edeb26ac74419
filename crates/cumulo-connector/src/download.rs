//! The blob download operation: validate, connect, check, download, respond.

use cumulo_core::error::{Error, Result};
use cumulo_core::pipeline::{MessageContext, StatusCode};
use cumulo_core::spool::SpoolRegistry;
use cumulo_object::credentials::StorageCredentials;

use crate::assembler::ResponseAssembler;
use crate::config::ConnectorConfig;
use crate::connection::{ConnectionProvider, StoreFactory};
use crate::consts;
use crate::resolver::ContentTypeResolver;

/// Immutable, validated request read once from the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalRequest {
    /// Container holding the blob.
    pub container: String,
    /// Name of the blob inside the container.
    pub file_name: String,
}

impl RetrievalRequest {
    /// Reads the two mandatory properties, rejecting the invocation before
    /// any remote call when either is missing or empty.
    pub fn from_context(ctx: &MessageContext) -> Result<Self> {
        let container = required(ctx, consts::CONTAINER_NAME)?;
        let file_name = required(ctx, consts::FILE_NAME)?;
        Ok(Self {
            container,
            file_name,
        })
    }
}

fn required(ctx: &MessageContext, name: &str) -> Result<String> {
    ctx.property(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_input().with_detail(format!("({name})")))
}

/// Outcome of one download invocation.
///
/// The not-found variants are soft outcomes: a status body has been
/// installed and the invocation returned normally. Hard failures never
/// reach this type; they abort with an [`Error`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retrieval {
    /// The blob was downloaded and installed as the outgoing body.
    Downloaded {
        /// Effective content type recorded on the response, if any.
        content_type: Option<String>,
        /// Number of bytes downloaded.
        size: usize,
    },
    /// The container does not exist; reported as a status payload.
    ContainerMissing,
    /// The blob does not exist; reported as a status payload.
    BlobMissing,
}

/// One-shot blob download operation for a message pipeline.
///
/// Each [`execute`](Self::execute) call owns its store handle and its
/// spool sink exclusively; the operation itself holds only configuration
/// and can serve concurrent invocations.
pub struct BlobDownload<P, F> {
    provider: P,
    factory: F,
    resolver: ContentTypeResolver,
    assembler: ResponseAssembler,
    spool: SpoolRegistry,
}

impl<P, F> BlobDownload<P, F>
where
    P: ConnectionProvider,
    F: StoreFactory,
{
    /// Builds the operation from configuration plus the two injected
    /// collaborators.
    pub fn new(config: &ConnectorConfig, provider: P, factory: F) -> Self {
        Self {
            provider,
            factory,
            resolver: ContentTypeResolver::new(),
            assembler: ResponseAssembler::new(config.envelope.clone()),
            spool: SpoolRegistry::new(&config.spool_dir),
        }
    }

    /// Runs the download end-to-end for one message.
    ///
    /// Exactly one body is installed on success and on soft not-found
    /// outcomes. Hard failures abort with a typed [`Error`] and leave the
    /// context body untouched; no retries happen at this layer.
    #[tracing::instrument(
        name = "connector.download",
        skip(self, ctx),
        fields(message_id = %ctx.message_id()),
    )]
    pub async fn execute(&self, ctx: &mut MessageContext) -> Result<Retrieval> {
        let request = RetrievalRequest::from_context(ctx)?;

        let connection_string = self.provider.connection_string(ctx)?;
        let credentials = StorageCredentials::parse(&connection_string)?;
        let store = self.factory.connect(&credentials).await?;

        // The container or blob can disappear between these checks and the
        // download; that window surfaces as a transport fault during the
        // download, no extra locking here.
        if !store.container_exists(&request.container).await? {
            tracing::debug!(container = %request.container, "container does not exist");
            self.assembler
                .attach_status(ctx, false, StatusCode::ContainerDoesNotExist);
            return Ok(Retrieval::ContainerMissing);
        }

        if !store
            .blob_exists(&request.container, &request.file_name)
            .await?
        {
            tracing::debug!(
                container = %request.container,
                file = %request.file_name,
                "blob does not exist"
            );
            self.assembler
                .attach_status(ctx, false, StatusCode::BlobDoesNotExist);
            return Ok(Retrieval::BlobMissing);
        }

        let output = store
            .download(&request.container, &request.file_name)
            .await?;
        let size = output.data.len();

        // Buffer through a unique local sink, fully written then fully
        // read back, before any document is built from it.
        let guard = self.spool.spool(&output.data).await?;
        let data = guard.read_back().await?;
        drop(guard);

        let resolved = self.resolver.resolve(data, output.content_type.as_deref())?;
        let content_type = resolved.content_type.clone();
        self.assembler.attach_document(ctx, resolved);

        tracing::info!(
            container = %request.container,
            file = %request.file_name,
            size,
            "blob downloaded"
        );
        Ok(Retrieval::Downloaded { content_type, size })
    }
}
