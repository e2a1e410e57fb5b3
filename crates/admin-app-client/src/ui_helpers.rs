use glacier_shared::req_args::FileAttachment;
use secrecy::{ExposeSecret as _, SecretString};

pub fn ui_password_edit(
    ui: &mut egui::Ui,
    password: &mut SecretString,
    hint_text: &str,
) -> egui::Response {
    let mut temp = password.expose_secret().to_owned();
    let result = ui.add(
        egui::TextEdit::singleline(&mut temp)
            .password(true)
            .hint_text(hint_text),
    );
    *password = SecretString::from(temp);
    result
}

/// Single line edit with the field name as label and hint
pub fn ui_labeled_edit(ui: &mut egui::Ui, value: &mut String, label: &str) -> egui::Response {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::TextEdit::singleline(value).hint_text(label))
    })
    .inner
}

/// Returns the trimmed value of a required field or the error to surface.
/// Required-ness is only checked here, at submit time.
pub fn required_field(value: &str, label: &str) -> anyhow::Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        anyhow::bail!("{label} is required");
    }
    Ok(trimmed.to_string())
}

/// Reads a picked file into memory for a multipart upload
#[cfg(not(target_arch = "wasm32"))]
pub fn load_attachment(path: &str) -> anyhow::Result<FileAttachment> {
    use anyhow::Context as _;

    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read file: {path}"))?;
    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    Ok(FileAttachment::new(file_name, bytes))
}

#[cfg(target_arch = "wasm32")]
pub fn load_attachment(_path: &str) -> anyhow::Result<FileAttachment> {
    // Uploads need filesystem access; the web build only supports the
    // JSON-bodied forms
    anyhow::bail!("file uploads are not supported in the web build")
}
