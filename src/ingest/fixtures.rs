/// Test fixtures: small source-table exports and boundary files, cfg(test) gated.
///
/// The tables mirror the column layout of the national mortality export
/// (Spanish headers, accented department and city names, free-text ages).
/// They are cut down to the rows each test needs.

/// Four rows, all valid, two years.
#[cfg(test)]
pub(crate) fn fixture_small_csv() -> &'static str {
    "FECHA DEFUNCIÓN,COVID-19,DEPARTAMENTO,MUNICIPIO,EDAD FALLECIDO\n\
     2021-01-15,CONFIRMADO,ANTIOQUIA,MEDELLÍN,67 AÑOS\n\
     2021-02-03,SOSPECHOSO,ANTIOQUIA,BELLO,80 AÑOS\n\
     2020-07-21,CONFIRMADO,ATLÁNTICO,BARRANQUILLA,54 AÑOS\n\
     2020-08-09,DESCARTADO,META,VILLAVICENCIO,3 MESES\n"
}

/// Semicolon export as written by spreadsheet tools in Spanish locales.
#[cfg(test)]
pub(crate) fn fixture_semicolon_csv() -> &'static str {
    "FECHA DEFUNCIÓN;COVID-19;DEPARTAMENTO;MUNICIPIO;EDAD FALLECIDO\n\
     15/01/2021;CONFIRMADO;ANTIOQUIA;MEDELLÍN;67\n\
     16/01/2021;CONFIRMADO;BOGOTÁ, D.C.;BOGOTÁ, D.C.;71\n"
}

/// Ten rows: six confirmed 2021 deaths (A: 4, B: 2), plus a suspected 2021
/// row, a confirmed 2020 row, and two rows with unusable dates.
#[cfg(test)]
pub(crate) fn fixture_region_csv() -> &'static str {
    "FECHA DEFUNCIÓN,COVID-19,DEPARTAMENTO,MUNICIPIO,EDAD FALLECIDO\n\
     2021-01-10,CONFIRMADO,A,A1,40\n\
     2021-01-22,CONFIRMADO,A,A1,41\n\
     2021-03-05,CONFIRMADO,A,A2,42\n\
     2021-06-30,CONFIRMADO,A,A2,43\n\
     2021-02-14,CONFIRMADO,B,B1,50\n\
     2021-02-15,CONFIRMADO,B,B1,51\n\
     2021-04-01,SOSPECHOSO,A,A1,60\n\
     2020-11-11,CONFIRMADO,B,B1,70\n\
     SIN DATO,CONFIRMADO,A,A1,80\n\
     ,CONFIRMADO,B,B1,90\n"
}

/// Two departments, keyed the way the national boundary file keys them.
#[cfg(test)]
pub(crate) fn fixture_boundaries_json() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "type": "Feature",
          "properties": { "DPTO": "05", "NOMBRE_DPT": "ANTIOQUIA" },
          "geometry": {
            "type": "Polygon",
            "coordinates": [[[-76.9, 5.9], [-74.9, 5.9], [-74.9, 8.9], [-76.9, 8.9], [-76.9, 5.9]]]
          }
        },
        {
          "type": "Feature",
          "properties": { "DPTO": "50", "NOMBRE_DPT": "META" },
          "geometry": {
            "type": "Polygon",
            "coordinates": [[[-74.9, 1.6], [-71.1, 1.6], [-71.1, 4.9], [-74.9, 4.9], [-74.9, 1.6]]]
          }
        },
        {
          "type": "Feature",
          "properties": { "DPTO": "99" },
          "geometry": null
        }
      ]
    }"#
}
