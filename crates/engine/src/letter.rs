//! Printable approval letter ("Surat Pengajuan Sanggah Absen").
//!
//! Produces one self-contained HTML page that prints itself on load.
//! Every interpolated value is escaped.

use chrono::{Locale, NaiveDate};
use db::{Dispute, Employee};

/// `2024-01-10` → `Rabu, 10 Januari 2024`.
pub fn format_date_id(date: NaiveDate) -> String {
    date.format_localized("%A, %-d %B %Y", Locale::id_ID).to_string()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn signature(employee: Option<&Employee>) -> String {
    match employee.and_then(|e| e.signature_base64.as_deref()) {
        Some(src) => format!(
            r#"<img src="{}" style="height: 80px; margin: 10px auto; display: block;" alt="Tanda Tangan" />"#,
            escape(src)
        ),
        None => r#"<div style="height: 80px; display: flex; align-items: center; justify-content: center; color: #ccc; font-style: italic;">(Belum ada TTD)</div>"#
            .to_string(),
    }
}

const STYLE: &str = r#"
    body { font-family: 'Times New Roman', serif; padding: 40px; max-width: 800px; margin: 0 auto; }
    .header { text-align: center; margin-bottom: 40px; border-bottom: 2px solid black; padding-bottom: 20px; }
    .header h1 { margin: 0; font-size: 18pt; text-transform: uppercase; }
    .content { font-size: 12pt; line-height: 1.6; margin-bottom: 60px; }
    .row { display: flex; margin-bottom: 10px; }
    .label { width: 180px; font-weight: bold; }
    .value { flex: 1; }
    .signatures { display: flex; justify-content: space-between; margin-top: 50px; page-break-inside: avoid; }
    .sig-block { text-align: center; width: 45%; }
    .name { font-weight: bold; text-decoration: underline; margin-top: 10px; }
    .nip { font-size: 11pt; }
    @media print {
      @page { margin: 2cm; }
      body { -webkit-print-color-adjust: exact; }
    }
"#;

/// Render the letter for `dispute`, filed by `employee` and decided by
/// `approver` (if known).  Without an approver the right-hand signature
/// block is left as a dotted line.
pub fn render_letter(employee: &Employee, approver: Option<&Employee>, dispute: &Dispute) -> String {
    let name = escape(&employee.name);
    let nip = escape(&employee.nip);

    let row = |label: &str, value: &str| {
        format!(
            r#"<div class="row"><span class="label">{label}</span><span class="value">: {value}</span></div>"#
        )
    };

    let approver_position = approver.map(|a| escape(&a.position)).unwrap_or_default();
    let approver_name = approver
        .map(|a| escape(&a.name))
        .unwrap_or_else(|| ".........................".to_string());
    let approver_nip = approver
        .map(|a| format!("NIP. {}", escape(&a.nip)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <title>Surat Sanggah Absen - {name}</title>
  <style>{STYLE}</style>
</head>
<body>
  <div class="header"><h1>Surat Pengajuan Sanggah Absen</h1></div>
  <div class="content">
    <p>Yang bertanda tangan di bawah ini:</p>
    {row_name}
    {row_nip}
    {row_position}
    {row_date}
    {row_reason}
    <p style="margin-top: 20px;">Demikian surat sanggah absen ini saya buat dengan sebenar-benarnya untuk dapat dipergunakan sebagaimana mestinya.</p>
  </div>
  <div class="signatures">
    <div class="sig-block">
      <p>Pemohon,</p>
      {employee_signature}
      <p class="name">{name}</p>
      <p class="nip">NIP. {nip}</p>
    </div>
    <div class="sig-block">
      <p>Menyetujui,</p>
      <p>{approver_position}</p>
      {approver_signature}
      <p class="name">{approver_name}</p>
      <p class="nip">{approver_nip}</p>
    </div>
  </div>
  <script>window.onload = function() {{ window.print(); }}</script>
</body>
</html>
"#,
        row_name = row("Nama", &name),
        row_nip = row("NIP", &nip),
        row_position = row("Jabatan", &escape(&employee.position)),
        row_date = row("Tanggal Sanggah", &format_date_id(dispute.date)),
        row_reason = row("Alasan", &escape(&dispute.reason)),
        employee_signature = signature(Some(employee)),
        approver_signature = signature(approver),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str, name: &str, signature: Option<&str>) -> Employee {
        Employee {
            id: id.into(),
            name: name.into(),
            nip: format!("1985{id}"),
            position: "Kepala Bagian Umum".into(),
            signature_base64: signature.map(String::from),
            is_approver: id == "1",
        }
    }

    fn dispute(reason: &str) -> Dispute {
        Dispute::pending("d1", "2", NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(), reason)
    }

    #[test]
    fn dates_use_indonesian_names() {
        assert_eq!(format_date_id(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()), "Rabu, 10 Januari 2024");
        assert_eq!(format_date_id(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()), "Minggu, 31 Desember 2023");
        assert_eq!(format_date_id(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()), "Jumat, 1 Maret 2024");
    }

    #[test]
    fn letter_names_both_parties() {
        let applicant = employee("2", "Siti Aminah", None);
        let approver = employee("1", "Budi Santoso", Some("data:image/png;base64,iVBOR"));
        let html = render_letter(&applicant, Some(&approver), &dispute("Mesin absen rusak"));

        assert!(html.contains("<title>Surat Sanggah Absen - Siti Aminah</title>"));
        assert!(html.contains("Rabu, 10 Januari 2024"));
        assert!(html.contains("Mesin absen rusak"));
        assert!(html.contains("NIP. 19851"));
        assert!(html.contains(r#"<img src="data:image/png;base64,iVBOR""#));
        // Applicant has no signature on file.
        assert!(html.contains("(Belum ada TTD)"));
    }

    #[test]
    fn missing_approver_leaves_placeholder() {
        let applicant = employee("2", "Siti Aminah", None);
        let html = render_letter(&applicant, None, &dispute("alasan"));
        assert!(html.contains(r#"<p class="name">.........................</p>"#));
    }

    #[test]
    fn user_text_is_escaped() {
        let applicant = employee("2", "Siti <b>Aminah</b>", None);
        let html = render_letter(&applicant, None, &dispute(r#"<script>alert("x")</script>"#));

        assert!(!html.contains("<b>Aminah</b>"));
        assert!(html.contains("Siti &lt;b&gt;Aminah&lt;/b&gt;"));
        assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"));
    }
}
