//! Deployment file templates for PHP dashboard bundles.

/// Docker image definition serving the app with Apache and PHP.
pub const DOCKERFILE: &str = r#"# Copyright (c) Jupyter Development Team.
# Distributed under the terms of the Modified BSD License.

FROM php:5.6-apache
ENV KERNEL_SERVICE_URL {{kernel_service_url}}
ENV TMPNB_MODE {{tmpnb_mode}}
COPY . /var/www/html/
"#;

/// Cloud Foundry application manifest.
pub const MANIFEST: &str = r#"# Copyright (c) Jupyter Development Team.
# Distributed under the terms of the Modified BSD License.
---
applications:
- name: {{notebook_name}}
  memory: 128M
  env:
    KERNEL_SERVICE_URL: {{kernel_service_url}}
    TMPNB_MODE: "{{tmpnb_mode}}"
"#;

/// Deployment notes shipped alongside the app.
pub const README: &str = r#"# Dashboard application bundle

This archive holds a dashboard web application generated from a notebook,
together with files for running it in a Docker container or on a Cloud
Foundry platform.

## Before you deploy

The dashboard does not execute code by itself. It asks a kernel service for a
kernel and sends the notebook's code cells there. The kernel service can be a
single Jupyter Notebook server or a multi-user tmpnb deployment. Anyone who can
reach the dashboard can run code on that service, so restrict access to it
accordingly. This bundle is a proof of concept and is not meant for production.

## Kernel service settings

Two environment variables tell the dashboard where its kernels come from:

* `KERNEL_SERVICE_URL`: base URL of the kernel service
* `TMPNB_MODE`: `true` when the service is tmpnb, `false` for a plain
  notebook server

Both files below were prefilled with the values of the notebook server that
produced this bundle.

## Docker

Build an image from the included `Dockerfile` and run it, publishing port 80
of the container. Change the `ENV` lines to point at another kernel service,
then rebuild and restart the container.

## Cloud Foundry

Unpack the archive and run `cf push` from the unpacked directory so that
`manifest.yml` is picked up. After editing the manifest, push again. After
changing a value with `cf set-env`, run `cf restage <appname>` so the app sees
its new environment.
"#;
