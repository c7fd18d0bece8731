//! Browser-side asset loader: fetch the glTF, fetch the buffers it points
//! at, decode into [`ModelData`].

use crate::fetch::fetch_bytes;
use instant::Instant;
use viewer_core::gltf_import::{
    decode_model, external_buffer_uris, model_name_from_url, parse_asset, resolve_buffers,
    resolve_uri,
};
use viewer_core::{LoadError, ModelData};

pub async fn load_model(url: &str) -> Result<ModelData, LoadError> {
    let started = Instant::now();
    let bytes = fetch_bytes(url).await?;
    log::info!("[asset] fetched {} ({} bytes)", url, bytes.len());

    let asset = parse_asset(&bytes)?;
    let mut fetched = Vec::new();
    for (index, uri) in external_buffer_uris(&asset) {
        let buffer_url = resolve_uri(url, &uri);
        let data = fetch_bytes(&buffer_url).await?;
        log::debug!("[asset] buffer {} <- {} ({} bytes)", index, buffer_url, data.len());
        fetched.push((index, data));
    }

    let (document, buffers) = resolve_buffers(asset, fetched)?;
    let model = decode_model(&model_name_from_url(url), &document, &buffers)?;
    log::info!(
        "[asset] decoded {} in {} ms: meshes={} vertices={} triangles={}",
        model.name,
        started.elapsed().as_millis(),
        model.meshes.len(),
        model.vertex_count(),
        model.triangle_count()
    );
    if let Some((min, max)) = model.bounds() {
        log::debug!("[asset] {} bounds {:?}..{:?}", model.name, min, max);
    }
    Ok(model)
}
