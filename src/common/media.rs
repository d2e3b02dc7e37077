// src/common/media.rs

/// Extrai o "public id" do host de mídia a partir da URL salva no curso.
///
/// As URLs têm o formato `https://<host>/<cloud>/image/upload/v<versao>/<public_id>.<ext>`:
/// pegamos o último segmento e cortamos a partir do último ponto.
/// Retorna `None` quando não sobra nada utilizável (URL vazia, sem extensão, terminando em `/`).
pub fn extract_public_id(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let last_segment = url.rsplit('/').next().unwrap_or(url);
    let (public_id, _extension) = last_segment.rsplit_once('.')?;

    if public_id.is_empty() {
        tracing::debug!("URL sem public id reconhecível: {}", url);
        return None;
    }

    Some(public_id.to_string())
}
