//! GPX 1.1 rendering
//!
//! ```text
//! <gpx version="1.1" creator="gpslock x.y.z" xmlns="http://www.topografix.com/GPX/1/1">
//!   <metadata><time>start</time></metadata>        (only with a known start)
//!   <trk><trkseg>
//!     <trkpt lat=".." lon=".."><ele>..</ele><time>..</time></trkpt>
//!   </trkseg></trk>
//! </gpx>
//! ```
//!
//! Point times are `start + offset`, rendered as RFC 3339 UTC with
//! millisecond precision. Without a known start the Unix epoch stands in,
//! so offsets survive the round trip.

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{TrackDocument, TrackPoint};
use crate::{
    errors::{ExportError, ExportResult},
    time::absolute_time,
    VERSION,
};

const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";

impl TrackDocument {
    /// Render as GPX into `writer`
    pub fn write_gpx<W: Write>(&self, writer: W) -> ExportResult<()> {
        let mut w = Writer::new_with_indent(writer, b' ', 2);
        let creator = format!("gpslock {VERSION}");

        w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut gpx = BytesStart::new("gpx");
        gpx.push_attribute(("version", "1.1"));
        gpx.push_attribute(("creator", creator.as_str()));
        gpx.push_attribute(("xmlns", GPX_NAMESPACE));
        w.write_event(Event::Start(gpx))?;

        if let Some(start) = self.start {
            w.write_event(Event::Start(BytesStart::new("metadata")))?;
            write_text_element(&mut w, "time", &format_time(start))?;
            w.write_event(Event::End(BytesEnd::new("metadata")))?;
        }

        w.write_event(Event::Start(BytesStart::new("trk")))?;
        w.write_event(Event::Start(BytesStart::new("trkseg")))?;

        let start = self.start.unwrap_or(DateTime::UNIX_EPOCH);
        for point in &self.points {
            write_point(&mut w, start, point)?;
        }

        w.write_event(Event::End(BytesEnd::new("trkseg")))?;
        w.write_event(Event::End(BytesEnd::new("trk")))?;
        w.write_event(Event::End(BytesEnd::new("gpx")))?;

        w.into_inner().flush()?;
        Ok(())
    }

    /// Render as a GPX string
    pub fn to_gpx_string(&self) -> ExportResult<String> {
        let mut buf = Vec::new();
        self.write_gpx(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

fn write_point<W: Write>(w: &mut Writer<W>, start: DateTime<Utc>, point: &TrackPoint) -> ExportResult<()> {
    let time = absolute_time(start, point.timestamp).ok_or(ExportError::TimeOutOfRange {
        offset_ms: point.timestamp.as_millis(),
    })?;

    let mut trkpt = BytesStart::new("trkpt");
    trkpt.push_attribute(("lat", point.latitude.to_string().as_str()));
    trkpt.push_attribute(("lon", point.longitude.to_string().as_str()));
    w.write_event(Event::Start(trkpt))?;

    if let Some(elevation) = point.elevation {
        write_text_element(w, "ele", &elevation.to_string())?;
    }
    write_text_element(w, "time", &format_time(time))?;

    w.write_event(Event::End(BytesEnd::new("trkpt")))?;
    Ok(())
}

fn write_text_element<W: Write>(w: &mut Writer<W>, name: &str, text: &str) -> ExportResult<()> {
    w.write_event(Event::Start(BytesStart::new(name)))?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}
